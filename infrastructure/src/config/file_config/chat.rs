//! Chat configuration from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};

/// Raw chat configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Send conversation history with each query
    pub use_history: bool,
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to the REPL line-history file
    pub history_file: Option<String>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            use_history: true,
            show_progress: true,
            history_file: None,
        }
    }
}
