//! CLI entrypoint for switchboard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use switchboard_application::{
    AgentManager, ChatSession, GatewayError, NoProgress, ProgressNotifier, ToolExecutorPort,
};
use switchboard_infrastructure::{ConfigLoader, FileConfig, LocalToolExecutor, OllamaLlmGateway};
use switchboard_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputFormat, ProgressMode, ProgressReporter, SimpleProgress,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    for issue in config.ensure_valid()? {
        warn!("{}", issue.message);
    }

    info!("Starting switchboard against {}", config.ollama.base_url);

    // === Dependency Injection ===
    let manager = Arc::new(build_manager(&config)?);

    if cli.list_agents {
        let agents = manager.list_agents();
        let output = match cli.output {
            OutputFormat::Text => ConsoleFormatter::format_agents(&agents, manager.fallback()),
            OutputFormat::Json => ConsoleFormatter::format_agents_json(&agents),
        };
        println!("{}", output);
        return Ok(ExitCode::SUCCESS);
    }

    // The backend must be up before any request is answered
    match manager.missing_models().await {
        Ok(missing) => {
            for model in missing {
                warn!(
                    "Model '{}' is not available on the Ollama server; run `ollama pull {}`",
                    model, model
                );
            }
        }
        Err(GatewayError::ConnectionError(e)) => bail!(
            "Cannot connect to Ollama at {}: {}. Make sure Ollama is running.",
            config.ollama.base_url,
            e
        ),
        Err(e) => warn!("Could not list Ollama models: {}", e),
    }

    if let Some(agent) = &cli.agent
        && !manager.has_agent(agent)
    {
        bail!(
            "Unknown agent '{}'. Available: {}",
            agent,
            manager.agent_names().collect::<Vec<_>>().join(", ")
        );
    }

    let progress_mode = progress_mode(&cli, &config);
    let session = ChatSession::new(manager)
        .with_config(config.to_chat_config())
        .with_history(config.chat.use_history && !cli.no_history);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(session)
            .with_progress(progress_mode)
            .with_agent(cli.agent.clone())
            .with_history_file(config.history_file());

        repl.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let progress: Box<dyn ProgressNotifier> = match progress_mode {
        ProgressMode::Spinner => Box::new(ProgressReporter::new()),
        ProgressMode::Plain => Box::new(SimpleProgress),
        ProgressMode::Off => Box::new(NoProgress),
    };

    let mut session = session;
    let response = match &cli.agent {
        Some(agent) => {
            session
                .query_with_agent_and_progress(agent, &question, progress.as_ref())
                .await
        }
        None => {
            session
                .query_with_progress(&question, progress.as_ref())
                .await
        }
    };

    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format_response(&response),
        OutputFormat::Json => ConsoleFormatter::format_json(&response),
    };
    println!("{}", output);

    Ok(if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Wire the Ollama gateway and local tools into an [`AgentManager`].
fn build_manager(config: &FileConfig) -> Result<AgentManager> {
    let gateway = OllamaLlmGateway::new(
        &config.ollama.base_url,
        config.ollama.timeout_seconds.map(Duration::from_secs),
    )?;

    let tools = LocalToolExecutor::new(config.workspace_dir())?
        .with_code_timeout(Duration::from_secs(config.tools.code_timeout_seconds))
        .with_calendar_token_file(config.calendar_token_file());
    info!("Tools: {}", tools.available_tools().join(", "));

    let manager = AgentManager::new(
        config.to_agent_system_config(),
        Arc::new(gateway),
        Arc::new(tools),
    )?;
    Ok(manager)
}

/// Spinner by default, plain lines when logs share the terminal.
fn progress_mode(cli: &Cli, config: &FileConfig) -> ProgressMode {
    if cli.quiet || !config.chat.show_progress {
        ProgressMode::Off
    } else if cli.verbose > 0 {
        ProgressMode::Plain
    } else {
        ProgressMode::Spinner
    }
}
