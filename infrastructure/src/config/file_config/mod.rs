//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! ([`AgentSystemConfig`], [`ChatConfig`]) once loaded.

mod agents;
mod chat;
mod ollama;
mod tools;

pub use agents::{FileAgentConfig, FileRouterConfig};
pub use chat::FileChatConfig;
pub use ollama::{DEFAULT_OLLAMA_URL, FileOllamaConfig};
pub use tools::{
    DEFAULT_CODE_TIMEOUT_SECONDS, DEFAULT_WORKSPACE_DIR, FileCalendarConfig, FileToolsConfig,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use switchboard_application::{AgentSystemConfig, ChatConfig};
use switchboard_domain::agent::validation::{ConfigIssue, ConfigIssueCode};
use switchboard_domain::routing::is_routable_name;
use switchboard_domain::tool::entities::ToolSpec;
use thiserror::Error;

/// Highest temperature accepted by validation
const MAX_TEMPERATURE: f32 = 2.0;

/// Configuration that cannot be used at all
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    InvalidTimeout { field: String },

    #[error("invalid configuration: {}", .0.iter().map(|i| i.message.as_str()).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ConfigIssue>),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Ollama server settings
    pub ollama: FileOllamaConfig,
    /// Router settings
    pub router: FileRouterConfig,
    /// Agents keyed by name. When the table is absent the built-in agents
    /// are used; an empty table means no agents at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<BTreeMap<String, FileAgentConfig>>,
    /// Tool settings
    pub tools: FileToolsConfig,
    /// Chat settings
    pub chat: FileChatConfig,
}

impl FileConfig {
    /// Agents in effect: the configured ones, or the built-in set.
    pub fn effective_agents(&self) -> BTreeMap<String, FileAgentConfig> {
        match &self.agents {
            Some(agents) => agents.clone(),
            None => AgentSystemConfig::default()
                .agents
                .iter()
                .map(|(name, definition)| (name.clone(), FileAgentConfig::from(definition)))
                .collect(),
        }
    }

    /// Validate against the tools this build provides.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with_tools(&crate::tools::default_tool_spec())
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors: no agents, empty model names, temperatures outside `[0, 2]`,
    /// a fallback that is not a configured agent. Unknown tool names are
    /// warnings only, since such calls are refused at call time.
    pub fn validate_with_tools(&self, tools: &ToolSpec) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let agents = self.effective_agents();

        if agents.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoAgents,
                "[agents] is empty: at least one agent must be configured",
            ));
        }

        check_model(&mut issues, "router.model", &self.router.model);
        check_temperature(&mut issues, "router.temperature", self.router.temperature);

        for (name, agent) in &agents {
            if !is_routable_name(name) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnroutableAgentName {
                        agent: name.clone(),
                    },
                    format!(
                        "agents.{}: the router only matches lower-case names without quotes or periods; this agent can only be selected with --agent",
                        name
                    ),
                ));
            }
            check_model(&mut issues, &format!("agents.{}.model", name), &agent.model);
            check_temperature(
                &mut issues,
                &format!("agents.{}.temperature", name),
                agent.temperature,
            );
            for tool in &agent.tools {
                if !tools.contains(tool.trim()) {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::UnknownTool {
                            agent: name.clone(),
                            tool: tool.clone(),
                        },
                        format!(
                            "agents.{}.tools: '{}' is not provided by this build; calls to it will fail",
                            name, tool
                        ),
                    ));
                }
            }
        }

        let fallback = self.router.fallback.trim();
        if !agents.is_empty() && !agents.contains_key(fallback) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownFallback {
                    fallback: fallback.to_string(),
                },
                format!(
                    "router.fallback: '{}' is not a configured agent",
                    fallback
                ),
            ));
        }

        issues
    }

    /// Fail on timeouts of zero and on error-severity issues; return the
    /// remaining warnings.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        if self.ollama.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "ollama.timeout_seconds".to_string(),
            });
        }
        if self.tools.code_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "tools.code_timeout_seconds".to_string(),
            });
        }

        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(errors))
        }
    }

    /// Build the agent system the application layer runs.
    pub fn to_agent_system_config(&self) -> AgentSystemConfig {
        self.effective_agents().iter().fold(
            AgentSystemConfig::new(self.router.to_definition()),
            |config, (name, agent)| config.with_agent(agent.to_definition(name)),
        )
    }

    pub fn to_chat_config(&self) -> ChatConfig {
        ChatConfig::default().with_history(self.chat.use_history)
    }

    pub fn workspace_dir(&self) -> PathBuf {
        expand_home(&self.tools.workspace_dir)
    }

    pub fn calendar_token_file(&self) -> Option<PathBuf> {
        self.tools.calendar.token_file.as_deref().map(expand_home)
    }

    pub fn history_file(&self) -> Option<PathBuf> {
        self.chat.history_file.as_deref().map(expand_home)
    }
}

fn check_model(issues: &mut Vec<ConfigIssue>, field: &str, model: &str) {
    if model.trim().is_empty() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::EmptyModelName {
                field: field.to_string(),
            },
            format!("{}: model name cannot be empty", field),
        ));
    }
}

fn check_temperature(issues: &mut Vec<ConfigIssue>, field: &str, temperature: f32) {
    if !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::InvalidTemperature {
                field: field.to_string(),
            },
            format!(
                "{}: {} is outside 0.0..={}",
                field, temperature, MAX_TEMPERATURE
            ),
        ));
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
