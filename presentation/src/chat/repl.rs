//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use switchboard_application::{ChatSession, NoProgress, ProgressNotifier};

/// Line-history entries kept on disk
const HISTORY_CAPACITY: usize = 1000;

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Agents,
    /// `/agent` with no argument: show the current mode
    ShowAgent,
    /// `/agent <name>` forces an agent, `/agent auto` returns to routing
    SetAgent(Option<String>),
    History,
    /// `/last`: the most recent query and its answer
    Last,
    Clear,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let argument = parts.next();
        match (command, argument) {
            ("/quit" | "/exit" | "/q", _) => Self::Quit,
            ("/help" | "/h" | "/?", _) => Self::Help,
            ("/agents", _) => Self::Agents,
            ("/agent", None) => Self::ShowAgent,
            ("/agent", Some("auto")) => Self::SetAgent(None),
            ("/agent", Some(name)) => Self::SetAgent(Some(name.to_string())),
            ("/history", _) => Self::History,
            ("/last", _) => Self::Last,
            ("/clear", _) => Self::Clear,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// How progress is shown while a request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Spinner,
    Plain,
    Off,
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: ChatSession,
    forced_agent: Option<String>,
    progress: ProgressMode,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            forced_agent: None,
            progress: ProgressMode::Spinner,
            history_file: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }

    /// Start with requests going to `agent` instead of the router
    pub fn with_agent(mut self, agent: Option<String>) -> Self {
        self.forced_agent = agent;
        self
    }

    /// Persist line-editor history to this file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn forced_agent(&self) -> Option<&str> {
        self.forced_agent.as_deref()
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = Reedline::create();
        if let Some(path) = &self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(history) = FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                editor = editor.with_history(Box::new(history));
            }
        }

        self.print_welcome();

        loop {
            let prompt = DefaultPrompt::new(
                DefaultPromptSegment::Basic(self.mode_label()),
                DefaultPromptSegment::Empty,
            );

            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)) {
                            break;
                        }
                        continue;
                    }
                    self.process_question(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn mode_label(&self) -> String {
        self.forced_agent.clone().unwrap_or_else(|| "auto".to_string())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Switchboard - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Agents: {}",
            self.session
                .manager()
                .agent_names()
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?        - Show this help");
        println!("  /agents              - List available agents");
        println!("  /agent <name|auto>   - Force an agent, or return to routing");
        println!("  /history             - Show the conversation so far");
        println!("  /last                - Show the last answer again");
        println!("  /clear               - Forget the conversation");
        println!("  /quit, /exit, /q     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    pub fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Agents => {
                let manager = self.session.manager();
                println!(
                    "{}",
                    ConsoleFormatter::format_agents(&manager.list_agents(), manager.fallback())
                );
            }
            ReplCommand::ShowAgent => match &self.forced_agent {
                Some(agent) => println!("Requests go to {}", agent.yellow()),
                None => println!("Requests are routed automatically"),
            },
            ReplCommand::SetAgent(None) => {
                self.forced_agent = None;
                println!("Routing requests automatically");
            }
            ReplCommand::SetAgent(Some(name)) => {
                if self.session.manager().has_agent(&name) {
                    println!("Requests now go to {}", name.yellow());
                    self.forced_agent = Some(name);
                } else {
                    println!("{} Unknown agent: {}", "x".red(), name);
                    println!("Type /agents for available agents");
                }
            }
            ReplCommand::History => {
                print!("{}", ConsoleFormatter::format_history(self.session.history()));
            }
            ReplCommand::Last => {
                print!(
                    "{}",
                    ConsoleFormatter::format_last_exchange(self.session.last_exchange())
                );
            }
            ReplCommand::Clear => {
                self.session.clear_history();
                println!("Conversation cleared");
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_question(&mut self, question: &str) {
        println!();

        let response = match self.progress {
            ProgressMode::Spinner => {
                let progress = ProgressReporter::new();
                self.ask(question, &progress).await
            }
            ProgressMode::Plain => self.ask(question, &SimpleProgress).await,
            ProgressMode::Off => self.ask(question, &NoProgress).await,
        };

        println!("{}", ConsoleFormatter::format_response(&response));
    }

    async fn ask(
        &mut self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> switchboard_application::AgentResponse {
        match &self.forced_agent {
            Some(agent) => {
                let agent = agent.clone();
                self.session
                    .query_with_agent_and_progress(&agent, question, progress)
                    .await
            }
            None => self.session.query_with_progress(question, progress).await,
        }
    }
}
