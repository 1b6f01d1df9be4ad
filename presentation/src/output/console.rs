//! Console output formatter for agent responses

use colored::Colorize;
use std::collections::BTreeMap;
use switchboard_application::{AgentResponse, Exchange};
use switchboard_domain::{AgentInfo, ConversationMessage, Role};

/// Formats agent responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The response text followed by an `[Agent: x | Tools: a, b]` line
    pub fn format_response(response: &AgentResponse) -> String {
        if response.is_error() {
            return format!("{}\n", response.response.red());
        }
        format!(
            "{}\n\n{}\n",
            response.response,
            Self::attribution(&response.agent_used, &response.tools_used).dimmed()
        )
    }

    /// Format as JSON
    pub fn format_json(response: &AgentResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn attribution(agent: &str, tools: &[String]) -> String {
        let tools = if tools.is_empty() {
            "none".to_string()
        } else {
            tools.join(", ")
        };
        format!("[Agent: {} | Tools: {}]", agent, tools)
    }

    /// Agent listing for `--list-agents` and `/agents`
    pub fn format_agents(agents: &BTreeMap<String, AgentInfo>, fallback: &str) -> String {
        let mut output = format!("{}\n", "Available agents:".cyan().bold());
        for (name, info) in agents {
            let marker = if name == fallback { " (fallback)" } else { "" };
            output.push_str(&format!(
                "\n  {}{}  {}\n",
                name.yellow().bold(),
                marker.dimmed(),
                format!("[{}]", info.model).dimmed()
            ));
            output.push_str(&format!("    {}\n", info.description));
            if !info.tools.is_empty() {
                output.push_str(&format!("    tools: {}\n", info.tools.join(", ")));
            }
        }
        output
    }

    /// Agent listing as JSON
    pub fn format_agents_json(agents: &BTreeMap<String, AgentInfo>) -> String {
        serde_json::to_string_pretty(agents).unwrap_or_else(|_| "{}".to_string())
    }

    /// Conversation history for the `/history` command
    pub fn format_history(history: &[ConversationMessage]) -> String {
        if history.is_empty() {
            return format!("{}\n", "No conversation history yet.".dimmed());
        }

        let mut output = String::new();
        for message in history {
            let time = message.timestamp.format("%H:%M:%S");
            match message.role {
                Role::User => {
                    output.push_str(&format!(
                        "{} {}\n",
                        format!("[{}] You:", time).cyan().bold(),
                        message.content
                    ));
                }
                Role::Assistant => {
                    let agent = message.agent_used.as_deref().unwrap_or("assistant");
                    output.push_str(&format!(
                        "{} {}\n",
                        format!("[{}] {}:", time, agent).yellow().bold(),
                        Self::indent_continuation(&message.content, "    ")
                    ));
                    if !message.tools_used.is_empty() {
                        output.push_str(&format!(
                            "    {}\n",
                            format!("tools: {}", message.tools_used.join(", ")).dimmed()
                        ));
                    }
                }
                Role::System => {}
            }
        }
        output
    }

    /// The last answered query for the `/last` command
    pub fn format_last_exchange(exchange: Option<Exchange<'_>>) -> String {
        let Some(exchange) = exchange else {
            return format!("{}\n", "No response yet.".dimmed());
        };

        let mut output = String::new();
        if let Some(query) = exchange.query {
            output.push_str(&format!("{} {}\n\n", "You:".cyan().bold(), query));
        }
        let response = exchange.response;
        output.push_str(&format!(
            "{}\n\n{}\n",
            response.content,
            Self::attribution(
                response.agent_used.as_deref().unwrap_or("assistant"),
                &response.tools_used
            )
            .dimmed()
        ));
        output
    }

    /// Indent every line after the first
    fn indent_continuation(text: &str, prefix: &str) -> String {
        text.lines()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    line.to_string()
                } else {
                    format!("{}{}", prefix, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
