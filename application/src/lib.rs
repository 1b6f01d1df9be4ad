//! Application layer for switchboard
//!
//! This crate contains use cases, port definitions, and the agent-system
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AgentSystemConfig, ChatConfig};
pub use ports::{
    llm_gateway::{ChatRequest, GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    tool_executor::{ToolExecutionError, ToolExecutorPort},
};
pub use use_cases::{
    agent_manager::{AgentManager, AgentResponse, ERROR_AGENT},
    chat_session::{ChatSession, Exchange},
    router::RouterAgent,
    specialized_agent::{AgentError, AgentOutput, SpecializedAgent},
};
