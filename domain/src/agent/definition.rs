//! Agent and router definitions (Value Objects)

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Model used by agents that do not name one explicitly
pub const DEFAULT_AGENT_MODEL: &str = "ministral:3b";

/// Sampling temperature used by agents that do not set one
pub const DEFAULT_AGENT_TEMPERATURE: f32 = 0.7;

/// Model used by the router when none is configured
pub const DEFAULT_ROUTER_MODEL: &str = "gemma2:2b";

/// Router temperature; kept low to bias toward a deterministic choice
pub const DEFAULT_ROUTER_TEMPERATURE: f32 = 0.3;

/// Agent that handles queries no specialist claims
pub const DEFAULT_FALLBACK_AGENT: &str = "general";

/// Identity and capabilities of one specialized agent.
///
/// Built once at startup from configuration and owned by its agent
/// instance. The builder methods consume `self`, so a definition cannot be
/// changed once it has been handed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    name: String,
    model: String,
    description: String,
    temperature: f32,
    allowed_tools: Vec<String>,
}

impl AgentDefinition {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            description: String::new(),
            temperature: DEFAULT_AGENT_TEMPERATURE,
            allowed_tools: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the allow-list. Duplicates are dropped, first occurrence wins.
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tools.clear();
        for tool in tools {
            let tool = tool.into();
            if !self.allowed_tools.contains(&tool) {
                self.allowed_tools.push(tool);
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn allowed_tools(&self) -> &[String] {
        &self.allowed_tools
    }

    pub fn has_tools(&self) -> bool {
        !self.allowed_tools.is_empty()
    }

    /// Whether `tool` is on this agent's allow-list
    pub fn allows(&self, tool: &str) -> bool {
        self.allowed_tools.iter().any(|t| t == tool)
    }

    /// Check structural validity. Tool names are not checked here: a
    /// definition may reference tools the dispatcher does not provide.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidAgent {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("agent name cannot be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(invalid("model name cannot be empty"));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(invalid("temperature must be a non-negative number"));
        }
        Ok(())
    }

    /// Introspection view used by agent listings
    pub fn info(&self) -> AgentInfo {
        AgentInfo {
            description: self.description.clone(),
            model: self.model.clone(),
            tools: self.allowed_tools.clone(),
        }
    }
}

/// Model settings for the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterDefinition {
    pub model: String,
    pub temperature: f32,
    /// Agent chosen whenever the router's answer is unusable
    pub fallback: String,
}

impl RouterDefinition {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl Default for RouterDefinition {
    fn default() -> Self {
        Self {
            model: DEFAULT_ROUTER_MODEL.to_string(),
            temperature: DEFAULT_ROUTER_TEMPERATURE,
            fallback: DEFAULT_FALLBACK_AGENT.to_string(),
        }
    }
}

/// Public description of an agent, as returned by agent listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub description: String,
    pub model: String,
    pub tools: Vec<String>,
}
