//! Local tool executor: the concrete implementation of [`ToolExecutorPort`].
//!
//! [`LocalToolExecutor`] bridges the application layer's tool dispatch
//! contract with actual system operations: file and document I/O, a Python
//! subprocess, Google Calendar and (optionally) web requests.
//!
//! # Dispatch
//!
//! ```text
//! ToolExecutorPort::execute()
//!   ├─ unknown name          → NOT_FOUND result
//!   ├─ DefaultToolValidator  → INVALID_ARGUMENT result
//!   ├─ file / document       → synchronous std::fs
//!   ├─ execute_code          → tokio::process with timeout
//!   ├─ calendar              → CalendarTools (lazy session)
//!   └─ web (web-tools)       → shared reqwest::Client
//! ```

use super::calendar::{self, CalendarTools};
use super::code;
use super::document;
use super::file;
use super::workspace::Workspace;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use switchboard_application::ports::tool_executor::{ToolExecutionError, ToolExecutorPort};
use switchboard_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
use tracing::debug;

/// Timeout of the shared HTTP client used by web and calendar tools
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Executor that runs tools on the local machine.
///
/// | Constructor | Tools | Use Case |
/// |-------------|-------|----------|
/// | [`new()`](Self::new) | All tools (11 + 2 web) | Normal operation |
/// | [`with_tools()`](Self::with_tools) | Custom [`ToolSpec`] | Testing / restricted setups |
#[derive(Debug)]
pub struct LocalToolExecutor {
    tool_spec: ToolSpec,
    workspace: Workspace,
    code_timeout: Duration,
    http_client: reqwest::Client,
    calendar: CalendarTools,
    #[cfg(feature = "web-tools")]
    search_endpoint: String,
}

impl LocalToolExecutor {
    /// Create an executor with all available tools, rooted at
    /// `workspace_dir` (created if missing).
    pub fn new(workspace_dir: impl Into<PathBuf>) -> Result<Self, ToolExecutionError> {
        let workspace = Workspace::new(workspace_dir);
        workspace.ensure()?;

        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| {
                ToolExecutionError::Failed(format!("Failed to create HTTP client: {}", e))
            })?;

        debug!("Tool workspace: {}", workspace.root().display());
        Ok(Self {
            tool_spec: super::default_tool_spec(),
            workspace,
            code_timeout: Duration::from_secs(crate::config::DEFAULT_CODE_TIMEOUT_SECONDS),
            calendar: CalendarTools::new(http_client.clone(), None),
            http_client,
            #[cfg(feature = "web-tools")]
            search_endpoint: super::web::DDG_API_URL.to_string(),
        })
    }

    /// Restrict the executor to a custom tool spec
    pub fn with_tools(mut self, tool_spec: ToolSpec) -> Self {
        self.tool_spec = tool_spec;
        self
    }

    /// Wall-clock limit for `execute_code`
    pub fn with_code_timeout(mut self, timeout: Duration) -> Self {
        self.code_timeout = timeout;
        self
    }

    /// Read the calendar access token from this JSON file instead of the
    /// environment.
    pub fn with_calendar_token_file(mut self, token_file: Option<PathBuf>) -> Self {
        self.calendar = self.calendar.with_token_file(token_file);
        self
    }

    /// Point `web_search` at another Instant Answer endpoint
    #[cfg(feature = "web-tools")]
    pub fn with_search_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.search_endpoint = endpoint.into();
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let ws = &self.workspace;
        match call.tool_name.as_str() {
            file::READ_FILE => file::execute_read_file(ws, call),
            file::WRITE_FILE => file::execute_write_file(ws, call),
            file::LIST_DIRECTORY => file::execute_list_directory(ws, call),
            file::CREATE_DIRECTORY => file::execute_create_directory(ws, call),
            file::DELETE_FILE => file::execute_delete_file(ws, call),
            document::EXTRACT_TEXT => document::execute_extract_text(ws, call),
            document::ANALYZE_DOCUMENT => document::execute_analyze_document(ws, call),
            code::EXECUTE_CODE => code::execute_execute_code(call, self.code_timeout).await,
            calendar::CREATE_EVENT => self.calendar.create_event(call).await,
            calendar::LIST_EVENTS => self.calendar.list_events(call).await,
            calendar::DELETE_EVENT => self.calendar.delete_event(call).await,
            #[cfg(feature = "web-tools")]
            super::web::WEB_SEARCH => {
                super::web::execute_web_search(&self.http_client, &self.search_endpoint, call)
                    .await
            }
            #[cfg(feature = "web-tools")]
            super::web::FETCH_URL => super::web::execute_fetch_url(&self.http_client, call).await,
            _ => ToolResult::failure(
                &call.tool_name,
                ToolError::execution_failed(format!(
                    "Tool '{}' is not implemented",
                    call.tool_name
                )),
            ),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolExecutionError> {
        let Some(definition) = self.tool_spec.get(&call.tool_name) else {
            return Ok(ToolResult::failure(
                &call.tool_name,
                ToolError::new("NOT_FOUND", format!("Tool {} not found", call.tool_name)),
            ));
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return Ok(ToolResult::failure(
                &call.tool_name,
                ToolError::invalid_argument(e),
            ));
        }

        debug!("Executing tool {}", call.tool_name);
        Ok(self.dispatch(call).await)
    }
}
