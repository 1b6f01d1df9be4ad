//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The response followed by an agent/tools line
    Text,
    /// `{response, agent_used, tools_used}` as JSON
    Json,
}

/// CLI arguments for switchboard
#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(author, version, about = "Local multi-agent assistant for Ollama")]
#[command(long_about = r#"
Switchboard routes each request to a specialized agent running on a local
Ollama server. Agents can call tools (files, documents, web, calendar, code)
and explain the results in plain language.

The process for each request:
1. Routing: a small router model picks the best agent
2. Action: the agent answers, optionally emitting tool calls
3. Synthesis: if tools ran, the agent turns their results into an answer

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./switchboard.toml       Project-level config
3. ~/.config/switchboard/config.toml   Global config

Example:
  switchboard "What is on my calendar this week?"
  switchboard --agent code_helper "Write a fizzbuzz in Python and run it"
  switchboard --chat
"#)]
pub struct Cli {
    /// The request to answer (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Send the request to this agent instead of routing it
    #[arg(short, long, value_name = "NAME")]
    pub agent: Option<String>,

    /// List the configured agents and exit
    #[arg(long)]
    pub list_agents: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not send conversation history with chat requests
    #[arg(long)]
    pub no_history: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
