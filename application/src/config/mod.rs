//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`AgentSystemConfig`]: agent definitions plus the router definition
//! - [`ChatConfig`]: chat session behavior (history on/off)

pub mod agent_system;
pub mod chat;

pub use agent_system::AgentSystemConfig;
pub use chat::ChatConfig;
