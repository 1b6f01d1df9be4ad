//! Tool Executor port
//!
//! Defines the tool dispatch contract: a name-keyed registry of callable
//! tools, each returning a uniform [`ToolResult`].

use async_trait::async_trait;
use switchboard_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::ToolResult,
};
use thiserror::Error;

/// A tool implementation failed outright instead of producing a result.
///
/// The agent converts this into a failed [`ToolResult`]; it never aborts a
/// turn.
#[derive(Error, Debug)]
pub enum ToolExecutionError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Port for tool execution
///
/// This port defines how the application layer executes tools.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all registered tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is registered
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().contains(name)
    }

    /// Get names of all registered tools, sorted
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Execute a tool call.
    ///
    /// Expected failures (missing file, HTTP error) come back as a failed
    /// `ToolResult`; `Err` is reserved for the implementation breaking down.
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolExecutionError>;
}
