//! Agent domain
//!
//! - [`definition::AgentDefinition`]: immutable identity of a specialized agent
//! - [`definition::RouterDefinition`]: model settings of the router
//! - [`capability::ToolAccess`]: capability gate for tool calls
//! - [`validation::ConfigIssue`]: structured configuration problems

pub mod capability;
pub mod definition;
pub mod validation;
