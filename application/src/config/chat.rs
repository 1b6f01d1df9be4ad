//! Chat session parameters.

use serde::{Deserialize, Serialize};

/// Controls how a [`ChatSession`](crate::use_cases::chat_session::ChatSession)
/// treats conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// When false, every query is sent with an empty history and nothing is
    /// recorded.
    pub use_history: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { use_history: true }
    }
}

impl ChatConfig {
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.use_history = enabled;
        self
    }
}
