//! Agent and router configuration from TOML (`[agents.<name>]`, `[router]`)

use serde::{Deserialize, Serialize};
use switchboard_domain::agent::definition::{
    AgentDefinition, DEFAULT_AGENT_MODEL, DEFAULT_AGENT_TEMPERATURE, DEFAULT_FALLBACK_AGENT,
    DEFAULT_ROUTER_MODEL, DEFAULT_ROUTER_TEMPERATURE, RouterDefinition,
};

/// Raw configuration of one agent
///
/// # Example
///
/// ```toml
/// [agents.file_manager]
/// model = "ministral:3b"
/// description = "File operations, saving documents, managing files"
/// temperature = 0.3
/// tools = ["read_file", "write_file", "list_directory", "create_directory"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub model: String,
    pub description: String,
    pub temperature: f32,
    pub tools: Vec<String>,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_AGENT_MODEL.to_string(),
            description: String::new(),
            temperature: DEFAULT_AGENT_TEMPERATURE,
            tools: Vec::new(),
        }
    }
}

impl FileAgentConfig {
    pub fn to_definition(&self, name: &str) -> AgentDefinition {
        AgentDefinition::new(name, self.model.trim())
            .with_description(&self.description)
            .with_temperature(self.temperature)
            .with_tools(self.tools.iter().map(|t| t.trim()))
    }
}

impl From<&AgentDefinition> for FileAgentConfig {
    fn from(definition: &AgentDefinition) -> Self {
        Self {
            model: definition.model().to_string(),
            description: definition.description().to_string(),
            temperature: definition.temperature(),
            tools: definition.allowed_tools().to_vec(),
        }
    }
}

/// Raw router configuration
///
/// ```toml
/// [router]
/// model = "gemma2:2b"
/// temperature = 0.3
/// fallback = "general"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRouterConfig {
    pub model: String,
    pub temperature: f32,
    pub fallback: String,
}

impl Default for FileRouterConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_ROUTER_MODEL.to_string(),
            temperature: DEFAULT_ROUTER_TEMPERATURE,
            fallback: DEFAULT_FALLBACK_AGENT.to_string(),
        }
    }
}

impl FileRouterConfig {
    pub fn to_definition(&self) -> RouterDefinition {
        RouterDefinition::new(self.model.trim())
            .with_temperature(self.temperature)
            .with_fallback(self.fallback.trim())
    }
}
