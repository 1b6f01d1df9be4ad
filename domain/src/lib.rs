//! Domain layer for switchboard
//!
//! This crate contains the core business rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Specialized Agents
//!
//! An agent is a bound `(model, allowed tools, description)` unit that answers
//! queries in its own domain. Agent definitions are created once from
//! configuration and never change afterwards.
//!
//! ## Routing
//!
//! A router model picks one agent name per query. Its free-text answer is
//! normalized by [`normalize_route`] and anything that is not an exact agent
//! name falls back to the configured fallback agent.
//!
//! ## Tool calls
//!
//! Models request tools through fenced ```` ```tool ```` blocks in their
//! prose. [`extract_tool_calls`] is the best-effort parser for that channel,
//! and [`ToolAccess`] is the capability gate applied before anything runs.

pub mod agent;
pub mod core;
pub mod prompt;
pub mod routing;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use agent::{
    capability::{CapabilityDenial, ToolAccess},
    definition::{AgentDefinition, AgentInfo, RouterDefinition},
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use core::error::DomainError;
pub use prompt::{AgentPromptTemplate, RouterPromptTemplate};
pub use routing::{RouteDecision, is_routable_name, normalize_route};
pub use session::entities::{ConversationMessage, HISTORY_WINDOW, Message, Role, history_window};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    parsing::extract_tool_calls,
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
