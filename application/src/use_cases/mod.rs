//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod agent_manager;
pub mod chat_session;
pub mod router;
pub mod specialized_agent;

#[cfg(test)]
pub(crate) mod test_support;
