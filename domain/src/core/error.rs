//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("No agents configured")]
    NoAgents,

    #[error("Invalid agent definition '{name}': {reason}")]
    InvalidAgent { name: String, reason: String },

    #[error("Fallback agent '{0}' is not a configured agent")]
    UnknownFallback(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),
}

impl DomainError {
    /// Check if this error was caused by a configuration problem
    /// (as opposed to a runtime lookup miss)
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, DomainError::AgentNotFound(_))
    }
}
