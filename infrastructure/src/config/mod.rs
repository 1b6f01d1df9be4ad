//! Configuration file loading for switchboard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `SWITCHBOARD_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./switchboard.toml` or `./.switchboard.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/switchboard/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_CODE_TIMEOUT_SECONDS, DEFAULT_OLLAMA_URL,
    DEFAULT_WORKSPACE_DIR, FileAgentConfig, FileCalendarConfig, FileChatConfig, FileConfig,
    FileOllamaConfig, FileRouterConfig, FileToolsConfig, expand_home,
};
pub use loader::ConfigLoader;
