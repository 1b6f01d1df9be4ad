//! Web tools: `web_search` and `fetch_url`
//!
//! Registered only when the `web-tools` feature is enabled. Both share the
//! executor's `reqwest::Client`.

mod fetch;
mod search;

pub use fetch::{FETCH_URL, execute_fetch_url, fetch_url_definition};
pub use search::{DDG_API_URL, WEB_SEARCH, execute_web_search, web_search_definition};
