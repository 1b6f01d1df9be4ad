//! Progress reporting while a request is routed and answered

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use switchboard_application::ports::progress::ProgressNotifier;

/// Reports progress with a single spinner line
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Update the running spinner, starting one if needed.
    fn show(&self, prefix: &str, message: String) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        let spinner = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        spinner.set_prefix(prefix.to_string());
        spinner.set_message(message);
    }

    /// Print a line above the spinner
    fn note(&self, line: String) {
        if let Ok(slot) = self.spinner.lock()
            && let Some(spinner) = slot.as_ref()
        {
            spinner.println(line);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_routing_start(&self) {
        self.show("Routing", "choosing an agent...".to_string());
    }

    fn on_route_selected(&self, agent: &str, fell_back: bool) {
        if fell_back {
            self.note(format!("  {} no clear match, using {}", "?".yellow(), agent));
        }
    }

    fn on_agent_start(&self, agent: &str) {
        self.show(agent, "thinking...".to_string());
    }

    fn on_tool_start(&self, tool: &str) {
        self.show("Tool", format!("running {}...", tool));
    }

    fn on_tool_complete(&self, tool: &str, success: bool) {
        let mark = if success { "v".green() } else { "x".red() };
        self.note(format!("  {} {}", mark, tool));
    }

    fn on_synthesis_start(&self, agent: &str) {
        self.show(agent, "summarizing tool results...".to_string());
    }

    fn on_complete(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(spinner) = slot.take()
        {
            spinner.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no spinner), used when logs share the terminal
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_routing_start(&self) {
        eprintln!("{} {}", "->".cyan(), "Routing".bold());
    }

    fn on_route_selected(&self, agent: &str, fell_back: bool) {
        let suffix = if fell_back { " (fallback)" } else { "" };
        eprintln!("  {} {}{}", "agent:".dimmed(), agent, suffix);
    }

    fn on_tool_complete(&self, tool: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), tool);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), tool);
        }
    }

    fn on_synthesis_start(&self, agent: &str) {
        eprintln!("{} {} {}", "->".cyan(), "Synthesis".bold(), agent);
    }
}
