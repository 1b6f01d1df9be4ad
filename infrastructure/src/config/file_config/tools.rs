//! Tools configuration from TOML (`[tools]` section)
//!
//! ```toml
//! [tools]
//! workspace_dir = "~/OllamaAssistant"
//! code_timeout_seconds = 10
//!
//! [tools.calendar]
//! token_file = "~/.switchboard/calendar_token.json"
//! ```

use serde::{Deserialize, Serialize};

/// Default workspace directory, relative to the home directory
pub const DEFAULT_WORKSPACE_DIR: &str = "~/OllamaAssistant";

/// Default limit for `execute_code`
pub const DEFAULT_CODE_TIMEOUT_SECONDS: u64 = 10;

/// Raw tools configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Directory relative tool paths resolve against
    pub workspace_dir: String,
    /// Wall-clock limit for one `execute_code` run
    pub code_timeout_seconds: u64,
    /// Google Calendar settings
    pub calendar: FileCalendarConfig,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            workspace_dir: DEFAULT_WORKSPACE_DIR.to_string(),
            code_timeout_seconds: DEFAULT_CODE_TIMEOUT_SECONDS,
            calendar: FileCalendarConfig::default(),
        }
    }
}

/// Raw calendar configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCalendarConfig {
    /// JSON file holding an OAuth `access_token`. When unset, the
    /// `GOOGLE_CALENDAR_ACCESS_TOKEN` environment variable is used instead.
    pub token_file: Option<String>,
}
