//! fetch_url tool: download a URL and return its body

use switchboard_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};

/// Tool name constant
pub const FETCH_URL: &str = "fetch_url";

/// Maximum response body size (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

pub fn fetch_url_definition() -> ToolDefinition {
    ToolDefinition::new(
        FETCH_URL,
        "Fetch a URL and return its content, status code and content type",
    )
    .with_parameter(ToolParameter::new("url", "The URL to fetch", true).with_type("url"))
}

pub async fn execute_fetch_url(client: &reqwest::Client, call: &ToolCall) -> ToolResult {
    let url = match call.require_string("url") {
        Ok(u) => u,
        Err(e) => return ToolResult::failure(FETCH_URL, ToolError::invalid_argument(e)),
    };

    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) if e.is_timeout() => {
            return ToolResult::failure(
                FETCH_URL,
                ToolError::timeout(format!("Timed out fetching {}", url)),
            );
        }
        Err(e) => {
            return ToolResult::failure(
                FETCH_URL,
                ToolError::execution_failed(format!("Failed to fetch URL: {}", e)),
            );
        }
    };

    let status = response.status();
    if !status.is_success() {
        return ToolResult::failure(
            FETCH_URL,
            ToolError::execution_failed(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )),
        );
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = match response.bytes().await {
        Ok(b) if b.len() > MAX_BODY_SIZE => {
            return ToolResult::failure(
                FETCH_URL,
                ToolError::execution_failed(format!("Response too large: {} bytes", b.len())),
            );
        }
        Ok(b) => b,
        Err(e) => {
            return ToolResult::failure(
                FETCH_URL,
                ToolError::execution_failed(format!("Failed to read response body: {}", e)),
            );
        }
    };

    ToolResult::success(FETCH_URL)
        .with_field("url", url)
        .with_field("content", String::from_utf8_lossy(&body).into_owned())
        .with_field("status_code", status.as_u16())
        .with_field("content_type", content_type)
}
