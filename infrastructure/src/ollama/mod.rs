//! Ollama adapter
//!
//! Implements the [`LlmGateway`](switchboard_application::LlmGateway) port
//! over Ollama's HTTP API (`/api/chat`, `/api/tags`).

pub mod gateway;
pub mod protocol;

pub use gateway::OllamaLlmGateway;
