//! LLM Gateway port
//!
//! Defines the interface for communicating with the model backend: a model
//! identifier, an ordered list of role-tagged messages and a temperature go
//! in, response text comes out.

use async_trait::async_trait;
use switchboard_domain::Message;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One model invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Opaque model identifier (e.g. "ministral:3b")
    pub model: String,
    /// Ordered conversation, system prompt first
    pub messages: Vec<Message>,
    /// Sampling temperature, passed through untouched
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the model backend.
/// Implementations (adapters) live in the infrastructure layer. No retry or
/// timeout policy is applied on top of it by the use cases.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one request and return the model's reply text
    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError>;

    /// Get the models the backend can serve
    async fn available_models(&self) -> Result<Vec<String>, GatewayError>;
}
