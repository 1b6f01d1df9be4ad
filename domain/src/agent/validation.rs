//! Structured configuration issues.
//!
//! Configuration is validated as a whole and every problem is reported as a
//! [`ConfigIssue`] with a severity, instead of failing on the first one.
//!
//! # Examples
//!
//! ```
//! use switchboard_domain::agent::validation::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issue = ConfigIssue::warning(
//!     ConfigIssueCode::UnknownTool {
//!         agent: "calendar".to_string(),
//!         tool: "create_event".to_string(),
//!     },
//!     "agents.calendar.tools: 'create_event' is not provided by any tool backend",
//! );
//! assert!(!issue.is_error());
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No `[agents]` entries at all.
    NoAgents,
    /// A model field is empty.
    EmptyModelName { field: String },
    /// A temperature is outside the supported range.
    InvalidTemperature { field: String },
    /// The router fallback does not name a configured agent.
    UnknownFallback { fallback: String },
    /// An agent lists a tool that no backend provides. Calls to it will fail
    /// at call time rather than at startup.
    UnknownTool { agent: String, tool: String },
    /// The router normalizes its answer (lower case, no quotes or periods),
    /// so it can never pick this agent. Forcing it by name still works.
    UnroutableAgentName { agent: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
