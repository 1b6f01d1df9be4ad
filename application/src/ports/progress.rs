//! Progress notification port
//!
//! Defines the interface for reporting progress while a query is routed and
//! executed.

/// Callback for progress updates during query processing
///
/// Implementations live in the presentation layer and can display progress
/// in various ways (spinner, plain text, nothing). All methods default to
/// no-ops.
pub trait ProgressNotifier: Send + Sync {
    /// Called before the router model is asked
    fn on_routing_start(&self) {}

    /// Called once the router has picked an agent
    fn on_route_selected(&self, _agent: &str, _fell_back: bool) {}

    /// Called before an agent's primary model call
    fn on_agent_start(&self, _agent: &str) {}

    /// Called before each tool call
    fn on_tool_start(&self, _tool: &str) {}

    /// Called after each tool call (or refusal)
    fn on_tool_complete(&self, _tool: &str, _success: bool) {}

    /// Called before the synthesis model call
    fn on_synthesis_start(&self, _agent: &str) {}

    /// Called when the query is fully answered
    fn on_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {}
