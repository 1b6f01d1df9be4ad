//! `web_search` tool: search via the DuckDuckGo Instant Answer API.
//!
//! The API needs no key. It returns an abstract and related topics rather
//! than a full result listing, so results are built from those two sections:
//! the abstract first (when present), then topics that carry text.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `query` | string | Yes | The search query |
//! | `num_results` | number | No | Result budget, default 5 |

use serde_json::{Value, json};
use switchboard_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use switchboard_domain::util::truncate_str;

/// Canonical tool name for the web search tool.
pub const WEB_SEARCH: &str = "web_search";

/// DuckDuckGo Instant Answer API endpoint (no API key required).
pub const DDG_API_URL: &str = "https://api.duckduckgo.com/";

const DEFAULT_NUM_RESULTS: i64 = 5;

/// Related-topic titles are the topic text cut to this many bytes
const TITLE_MAX_BYTES: usize = 100;

pub fn web_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        WEB_SEARCH,
        "Search the web using DuckDuckGo. Returns titles, snippets and URLs.",
    )
    .with_parameter(ToolParameter::new("query", "The search query", true))
    .with_parameter(
        ToolParameter::new("num_results", "Maximum number of results (default 5)", false)
            .with_type("number"),
    )
}

/// Query `endpoint` (normally [`DDG_API_URL`]) and collect results.
pub async fn execute_web_search(
    client: &reqwest::Client,
    endpoint: &str,
    call: &ToolCall,
) -> ToolResult {
    let query = match call.require_string("query") {
        Ok(q) => q,
        Err(e) => return ToolResult::failure(WEB_SEARCH, ToolError::invalid_argument(e)),
    };
    let num_results = call
        .get_i64("num_results")
        .unwrap_or(DEFAULT_NUM_RESULTS)
        .max(0) as usize;

    let response = match client
        .get(endpoint)
        .query(&[("q", query), ("format", "json"), ("no_html", "1")])
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            return ToolResult::failure(
                WEB_SEARCH,
                ToolError::execution_failed(format!("Search request failed: {}", e)),
            );
        }
    };

    if !response.status().is_success() {
        return ToolResult::failure(
            WEB_SEARCH,
            ToolError::execution_failed(format!(
                "Search API returned error: {}",
                response.status()
            )),
        );
    }

    let body: Value = match response.json().await {
        Ok(j) => j,
        Err(e) => {
            return ToolResult::failure(
                WEB_SEARCH,
                ToolError::execution_failed(format!("Failed to parse search results: {}", e)),
            );
        }
    };

    let results = collect_results(&body, num_results);
    let count = results.len();
    ToolResult::success(WEB_SEARCH)
        .with_field("query", query)
        .with_field("results", results)
        .with_field("count", count)
}

/// Build `{title, snippet, url}` entries from an Instant Answer response.
///
/// The abstract does not count against the topic budget: at most
/// `num_results - 1` related topics are considered, and nested topic
/// groups (entries without `Text`) are skipped without being replaced.
fn collect_results(data: &Value, num_results: usize) -> Vec<Value> {
    let mut results = Vec::new();

    if let Some(abstract_text) = data["Abstract"].as_str()
        && !abstract_text.is_empty()
    {
        results.push(json!({
            "title": data["Heading"].as_str().unwrap_or(""),
            "snippet": abstract_text,
            "url": data["AbstractURL"].as_str().unwrap_or(""),
        }));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        for topic in topics.iter().take(num_results.saturating_sub(1)) {
            let Some(text) = topic["Text"].as_str() else {
                continue;
            };
            results.push(json!({
                "title": truncate_str(text, TITLE_MAX_BYTES),
                "snippet": text,
                "url": topic["FirstURL"].as_str().unwrap_or(""),
            }));
        }
    }

    results
}
