//! Ollama LLM Gateway implementation

use super::protocol::{ChatRequestBody, ChatResponseBody, ErrorBody, TagsResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use switchboard_application::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use tracing::{debug, info};

/// LLM Gateway implementation for a local or remote Ollama server
///
/// Each [`chat`](LlmGateway::chat) call is one non-streaming
/// `POST /api/chat`. No retries are attempted.
#[derive(Debug, Clone)]
pub struct OllamaLlmGateway {
    client: Client,
    base_url: String,
}

impl OllamaLlmGateway {
    /// Create a gateway for `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;

        let gateway = Self::with_client(base_url, client);
        info!("OllamaLlmGateway initialized for {}", gateway.base_url);
        Ok(gateway)
    }

    /// Create a gateway with an existing HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn map_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Turn a non-2xx response into a gateway error, using Ollama's
/// `{"error": ...}` body when present.
async fn error_for_status(response: Response, model: Option<&str>) -> GatewayError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    match model {
        Some(model) if status == reqwest::StatusCode::NOT_FOUND => {
            GatewayError::ModelNotAvailable(format!("{}: {}", model, message))
        }
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, message)),
    }
}

#[async_trait]
impl LlmGateway for OllamaLlmGateway {
    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        let body = ChatRequestBody::new(&request.model, &request.messages, request.temperature);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(error_for_status(response, Some(&request.model)).await);
        }

        let parsed: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        debug!(
            model = %request.model,
            chars = parsed.message.content.len(),
            "Received chat response"
        );
        Ok(parsed.message.content)
    }

    async fn available_models(&self) -> Result<Vec<String>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(error_for_status(response, None).await);
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
