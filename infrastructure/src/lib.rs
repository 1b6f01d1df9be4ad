//! Infrastructure layer for switchboard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Ollama HTTP gateway, the local tool
//! executor, and configuration file loading.

pub mod config;
pub mod ollama;
pub mod tools;

#[cfg(test)]
mod test_http;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileChatConfig, FileConfig,
    FileOllamaConfig, FileRouterConfig, FileToolsConfig,
};
pub use ollama::OllamaLlmGateway;
pub use tools::{LocalToolExecutor, default_tool_spec};
