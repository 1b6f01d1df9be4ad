//! Prompt domain
//!
//! Templates for the three kinds of model calls: the agent's primary call,
//! its synthesis call, and the router's selection call.

pub mod agent;
pub mod router;

pub use agent::AgentPromptTemplate;
pub use router::RouterPromptTemplate;
