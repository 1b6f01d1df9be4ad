//! Ollama HTTP API wire types.
//!
//! Only the non-streaming subset used by the gateway is modeled.

use serde::{Deserialize, Serialize};
use switchboard_domain::Message;

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequestBody<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
    pub stream: bool,
    pub options: ChatOptions,
}

impl<'a> ChatRequestBody<'a> {
    pub fn new(model: &'a str, messages: &'a [Message], temperature: f32) -> Self {
        Self {
            model,
            messages: messages.iter().map(WireMessage::from).collect(),
            stream: false,
            options: ChatOptions { temperature },
        }
    }
}

/// One message as Ollama expects it
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for WireMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

/// Sampling options
#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    pub temperature: f32,
}

/// Body of a successful `/api/chat` response
#[derive(Debug, Deserialize)]
pub struct ChatResponseBody {
    pub message: ResponseMessage,
    #[serde(default)]
    pub done_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
}

/// Body of an error response (`{"error": "..."}`)
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /api/tags`
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![Message::system("be brief"), Message::user("hi")];
        let body = ChatRequestBody::new("ministral:3b", &messages, 0.3);

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "ministral:3b");
        assert_eq!(value["stream"], false);
        assert_eq!(
            value["messages"],
            json!([
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"}
            ])
        );
        let temperature = value["options"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_parse_chat_response() {
        let body: ChatResponseBody = serde_json::from_str(
            r#"{"model":"m","created_at":"2024-01-01T00:00:00Z","message":{"role":"assistant","content":"Hello"},"done":true,"done_reason":"stop"}"#,
        )
        .unwrap();
        assert_eq!(body.message.content, "Hello");
        assert_eq!(body.done_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_parse_tags() {
        let tags: TagsResponse =
            serde_json::from_str(r#"{"models":[{"name":"gemma2:2b","size":1},{"name":"ministral:3b"}]}"#)
                .unwrap();
        let names: Vec<_> = tags.models.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["gemma2:2b", "ministral:3b"]);
    }
}
