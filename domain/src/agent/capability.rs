//! Capability gating for tool calls.
//!
//! A tool call is honored only when the tool is both registered with the
//! dispatcher and on the calling agent's allow-list. The two ways of failing
//! are kept apart as [`CapabilityDenial`] variants and only collapse into a
//! single [`ToolError`] at the result boundary.

use super::definition::AgentDefinition;
use crate::tool::entities::ToolSpec;
use crate::tool::value_objects::ToolError;
use std::fmt;

/// Why a tool call was refused before execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityDenial {
    /// No tool with this name exists in the dispatcher
    NotRegistered(String),
    /// The tool exists but this agent may not use it
    NotPermitted(String),
}

impl CapabilityDenial {
    pub fn tool_name(&self) -> &str {
        match self {
            CapabilityDenial::NotRegistered(name) | CapabilityDenial::NotPermitted(name) => name,
        }
    }
}

impl fmt::Display for CapabilityDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityDenial::NotRegistered(name) => write!(f, "Tool {} not found", name),
            CapabilityDenial::NotPermitted(name) => {
                write!(f, "Tool {} not available to this agent", name)
            }
        }
    }
}

impl From<CapabilityDenial> for ToolError {
    fn from(denial: CapabilityDenial) -> Self {
        let message = denial.to_string();
        match denial {
            CapabilityDenial::NotRegistered(_) => ToolError::new("NOT_FOUND", message),
            CapabilityDenial::NotPermitted(_) => ToolError::new("PERMISSION_DENIED", message),
        }
    }
}

/// Capability gate
pub struct ToolAccess;

impl ToolAccess {
    /// Decide whether `agent` may invoke `tool_name` given the registered
    /// tools. Registration is checked before permission.
    pub fn check(
        spec: &ToolSpec,
        agent: &AgentDefinition,
        tool_name: &str,
    ) -> Result<(), CapabilityDenial> {
        if spec.get(tool_name).is_none() {
            return Err(CapabilityDenial::NotRegistered(tool_name.to_string()));
        }
        if !agent.allows(tool_name) {
            return Err(CapabilityDenial::NotPermitted(tool_name.to_string()));
        }
        Ok(())
    }
}
