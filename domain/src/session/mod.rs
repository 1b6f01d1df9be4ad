//! Conversation domain.
//!
//! - [`entities::Message`]: a single role-tagged message sent to a model
//! - [`entities::ConversationMessage`]: a history entry owned by the caller

pub mod entities;
