//! Calendar tools: create_event, list_events, delete_event
//!
//! Talks to the Google Calendar v3 REST API on the `primary` calendar with an
//! OAuth bearer token. The token is loaded on first use and kept for the life
//! of the executor; a failed load is not cached, so fixing the token file
//! takes effect on the next call.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use switchboard_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub const CREATE_EVENT: &str = "create_event";
pub const LIST_EVENTS: &str = "list_events";
pub const DELETE_EVENT: &str = "delete_event";

/// Google Calendar API root
pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

/// Environment variable consulted when no token file is configured
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_CALENDAR_ACCESS_TOKEN";

const NOT_CONFIGURED: &str = "Google Calendar not configured";

pub fn create_event_definition() -> ToolDefinition {
    ToolDefinition::new(CREATE_EVENT, "Create a calendar event")
        .with_parameter(ToolParameter::new("summary", "Event title", true))
        .with_parameter(
            ToolParameter::new("start_time", "Start time (ISO 8601)", true).with_type("datetime"),
        )
        .with_parameter(
            ToolParameter::new(
                "end_time",
                "End time (ISO 8601, defaults to one hour after start)",
                false,
            )
            .with_type("datetime"),
        )
        .with_parameter(ToolParameter::new("description", "Event description", false))
}

pub fn list_events_definition() -> ToolDefinition {
    ToolDefinition::new(LIST_EVENTS, "List upcoming calendar events")
        .with_parameter(
            ToolParameter::new("max_results", "Maximum number of events (default 10)", false)
                .with_type("number"),
        )
        .with_parameter(
            ToolParameter::new("time_min", "Earliest start time (ISO 8601, default now)", false)
                .with_type("datetime"),
        )
}

pub fn delete_event_definition() -> ToolDefinition {
    ToolDefinition::new(DELETE_EVENT, "Delete a calendar event by id")
        .with_parameter(ToolParameter::new("event_id", "Id of the event to delete", true))
}

/// Authenticated handle, created once per executor
struct CalendarSession {
    access_token: String,
}

impl std::fmt::Debug for CalendarSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarSession")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenFile {
    access_token: String,
}

/// Lazily-authenticated Google Calendar client
#[derive(Debug)]
pub struct CalendarTools {
    http: reqwest::Client,
    base_url: String,
    token_file: Option<PathBuf>,
    session: OnceCell<CalendarSession>,
}

impl CalendarTools {
    /// With a token file, only that file is used; otherwise the token comes
    /// from `GOOGLE_CALENDAR_ACCESS_TOKEN`.
    pub fn new(http: reqwest::Client, token_file: Option<PathBuf>) -> Self {
        Self {
            http,
            base_url: GOOGLE_CALENDAR_API.to_string(),
            token_file,
            session: OnceCell::new(),
        }
    }

    /// Use another token source. Any cached session is discarded.
    pub fn with_token_file(mut self, token_file: Option<PathBuf>) -> Self {
        self.token_file = token_file;
        self.session = OnceCell::new();
        self
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn load_token(&self) -> Result<String, String> {
        match &self.token_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| format!("{}: {}", path.display(), e))?;
                let parsed: TokenFile = serde_json::from_str(&raw)
                    .map_err(|e| format!("{}: {}", path.display(), e))?;
                Ok(parsed.access_token)
            }
            None => std::env::var(ACCESS_TOKEN_ENV)
                .map_err(|_| format!("{} is not set", ACCESS_TOKEN_ENV)),
        }
        .and_then(|token| {
            let token = token.trim().to_string();
            if token.is_empty() {
                Err("access token is empty".to_string())
            } else {
                Ok(token)
            }
        })
    }

    async fn session(&self) -> Result<&CalendarSession, ToolError> {
        self.session
            .get_or_try_init(|| async {
                let access_token = self.load_token()?;
                info!("Google Calendar session initialized");
                Ok::<_, String>(CalendarSession { access_token })
            })
            .await
            .map_err(|reason| {
                debug!("Calendar unavailable: {}", reason);
                ToolError::unavailable(NOT_CONFIGURED).with_details(reason)
            })
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/primary/events", self.base_url)
    }

    async fn send(&self, tool: &str, request: reqwest::RequestBuilder) -> Result<Value, ToolResult> {
        let session = self
            .session()
            .await
            .map_err(|e| ToolResult::failure(tool, e))?;

        let response = request
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| {
                ToolResult::failure(
                    tool,
                    ToolError::execution_failed(format!("Calendar request failed: {}", e)),
                )
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or(text);
            return Err(ToolResult::failure(
                tool,
                ToolError::execution_failed(format!("Calendar API error ({}): {}", status, message)),
            ));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            ToolResult::failure(
                tool,
                ToolError::execution_failed(format!("Invalid calendar response: {}", e)),
            )
        })
    }

    pub async fn create_event(&self, call: &ToolCall) -> ToolResult {
        let summary = match call.require_string("summary") {
            Ok(s) => s,
            Err(e) => return ToolResult::failure(CREATE_EVENT, ToolError::invalid_argument(e)),
        };
        let start = match call.require_string("start_time").and_then(EventTime::parse) {
            Ok(t) => t,
            Err(e) => return ToolResult::failure(CREATE_EVENT, ToolError::invalid_argument(e)),
        };
        let end = match call.get_string("end_time") {
            Some(raw) => match EventTime::parse(raw) {
                Ok(t) => t,
                Err(e) => {
                    return ToolResult::failure(CREATE_EVENT, ToolError::invalid_argument(e));
                }
            },
            None => start.plus(Duration::hours(1)),
        };
        let description = call.get_string("description").unwrap_or("");

        let body = json!({
            "summary": summary,
            "description": description,
            "start": {"dateTime": start.to_iso(), "timeZone": "UTC"},
            "end": {"dateTime": end.to_iso(), "timeZone": "UTC"},
        });
        let request = self.http.post(self.events_url()).json(&body);

        match self.send(CREATE_EVENT, request).await {
            Ok(created) => ToolResult::success(CREATE_EVENT)
                .with_field("event_id", created["id"].as_str().unwrap_or_default())
                .with_field("summary", summary)
                .with_field("start", start.to_iso())
                .with_field("link", created["htmlLink"].as_str().unwrap_or_default()),
            Err(failure) => failure,
        }
    }

    pub async fn list_events(&self, call: &ToolCall) -> ToolResult {
        let max_results = call.get_i64("max_results").unwrap_or(10).max(1);
        let time_min = call
            .get_string("time_min")
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));

        let request = self.http.get(self.events_url()).query(&[
            ("timeMin", time_min),
            ("maxResults", max_results.to_string()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ]);

        let listed = match self.send(LIST_EVENTS, request).await {
            Ok(listed) => listed,
            Err(failure) => return failure,
        };

        let events: Vec<Value> = listed["items"]
            .as_array()
            .map(|items| items.iter().map(summarize_event).collect())
            .unwrap_or_default();
        let count = events.len();
        ToolResult::success(LIST_EVENTS)
            .with_field("events", events)
            .with_field("count", count)
    }

    pub async fn delete_event(&self, call: &ToolCall) -> ToolResult {
        let event_id = match call.require_string("event_id") {
            Ok(id) => id,
            Err(e) => return ToolResult::failure(DELETE_EVENT, ToolError::invalid_argument(e)),
        };
        let url = format!("{}/{}", self.events_url(), event_id);

        match self.send(DELETE_EVENT, self.http.delete(url)).await {
            Ok(_) => ToolResult::success(DELETE_EVENT)
                .with_field("event_id", event_id)
                .with_field("message", "Event deleted"),
            Err(failure) => failure,
        }
    }
}

fn summarize_event(event: &Value) -> Value {
    let when = |key: &str| {
        event[key]["dateTime"]
            .as_str()
            .or_else(|| event[key]["date"].as_str())
            .map(str::to_string)
    };
    json!({
        "id": event["id"],
        "summary": event["summary"].as_str().unwrap_or("No title"),
        "start": when("start"),
        "end": when("end"),
        "description": event["description"].as_str().unwrap_or(""),
    })
}

/// An event time as given by the model: with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
enum EventTime {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl EventTime {
    const NAIVE_FORMATS: [&'static str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::Zoned(t));
        }
        Self::NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(Self::Naive)
            .ok_or_else(|| format!("Invalid date/time: {}", raw))
    }

    fn plus(self, delta: Duration) -> Self {
        match self {
            Self::Zoned(t) => Self::Zoned(t + delta),
            Self::Naive(t) => Self::Naive(t + delta),
        }
    }

    fn to_iso(self) -> String {
        match self {
            Self::Zoned(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            Self::Naive(t) => t.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::StubServer;

    fn tools(server: &StubServer, dir: &tempfile::TempDir) -> CalendarTools {
        let token = dir.path().join("token.json");
        std::fs::write(&token, r#"{"access_token":"secret-token"}"#).unwrap();
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        CalendarTools::new(http, Some(token)).with_base_url(&server.base_url)
    }

    #[test]
    fn test_event_time_parsing() {
        let zoned = EventTime::parse("2026-03-01T09:30:00Z").unwrap();
        assert_eq!(zoned.to_iso(), "2026-03-01T09:30:00+00:00");
        assert_eq!(
            zoned.plus(Duration::hours(1)).to_iso(),
            "2026-03-01T10:30:00+00:00"
        );

        let naive = EventTime::parse("2026-03-01T09:30").unwrap();
        assert_eq!(naive.to_iso(), "2026-03-01T09:30:00");

        assert!(EventTime::parse("next tuesday").is_err());
    }

    #[tokio::test]
    async fn test_create_event_defaults_end_to_one_hour() {
        let server = StubServer::start(vec![(
            200,
            r#"{"id":"evt1","htmlLink":"https://calendar.example/evt1"}"#,
        )])
        .await;
        let dir = tempfile::tempdir().unwrap();

        let call = ToolCall::new(CREATE_EVENT)
            .with_arg("summary", "Standup")
            .with_arg("start_time", "2026-03-01T09:00:00");
        let result = tools(&server, &dir).create_event(&call).await;

        assert!(result.is_success());
        assert_eq!(result.field("event_id"), Some(&json!("evt1")));
        assert_eq!(result.field("start"), Some(&json!("2026-03-01T09:00:00")));
        assert_eq!(
            result.field("link"),
            Some(&json!("https://calendar.example/evt1"))
        );

        let request = &server.requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/calendars/primary/events");
        assert_eq!(request.header("authorization"), Some("Bearer secret-token"));
        let body = request.json();
        assert_eq!(body["end"]["dateTime"], "2026-03-01T10:00:00");
        assert_eq!(body["start"]["timeZone"], "UTC");
        assert_eq!(body["description"], "");
    }

    #[tokio::test]
    async fn test_list_events_summarizes_items() {
        let server = StubServer::start(vec![(
            200,
            r#"{"items":[
                {"id":"a","summary":"Lunch","start":{"dateTime":"2026-03-01T12:00:00Z"},"end":{"dateTime":"2026-03-01T13:00:00Z"}},
                {"id":"b","start":{"date":"2026-03-02"},"end":{"date":"2026-03-03"},"description":"all day"}
            ]}"#,
        )])
        .await;
        let dir = tempfile::tempdir().unwrap();

        let call = ToolCall::new(LIST_EVENTS)
            .with_arg("max_results", 5)
            .with_arg("time_min", "2026-03-01T00:00:00Z");
        let result = tools(&server, &dir).list_events(&call).await;

        assert!(result.is_success());
        assert_eq!(result.field("count"), Some(&json!(2)));
        assert_eq!(
            result.field("events"),
            Some(&json!([
                {"id": "a", "summary": "Lunch", "start": "2026-03-01T12:00:00Z",
                 "end": "2026-03-01T13:00:00Z", "description": ""},
                {"id": "b", "summary": "No title", "start": "2026-03-02",
                 "end": "2026-03-03", "description": "all day"},
            ]))
        );

        let path = &server.requests()[0].path;
        assert!(path.contains("maxResults=5"));
        assert!(path.contains("singleEvents=true"));
        assert!(path.contains("orderBy=startTime"));
    }

    #[tokio::test]
    async fn test_delete_event() {
        let server = StubServer::start(vec![(204, "")]).await;
        let dir = tempfile::tempdir().unwrap();

        let call = ToolCall::new(DELETE_EVENT).with_arg("event_id", "evt1");
        let result = tools(&server, &dir).delete_event(&call).await;

        assert!(result.is_success());
        assert_eq!(result.field("message"), Some(&json!("Event deleted")));
        assert_eq!(server.requests()[0].method, "DELETE");
        assert_eq!(server.requests()[0].path, "/calendars/primary/events/evt1");
    }

    #[tokio::test]
    async fn test_api_error_is_a_failed_result() {
        let server = StubServer::start(vec![(
            404,
            r#"{"error":{"code":404,"message":"Not Found"}}"#,
        )])
        .await;
        let dir = tempfile::tempdir().unwrap();

        let call = ToolCall::new(DELETE_EVENT).with_arg("event_id", "missing");
        let result = tools(&server, &dir).delete_event(&call).await;

        let error = result.error().unwrap();
        assert_eq!(error.code, "EXECUTION_FAILED");
        assert!(error.message.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_not_configured_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let token = dir.path().join("token.json");
        let calendar = CalendarTools::new(reqwest::Client::new(), Some(token.clone()))
            .with_base_url("http://127.0.0.1:9");

        let result = calendar.list_events(&ToolCall::new(LIST_EVENTS)).await;
        let error = result.error().unwrap();
        assert_eq!(error.code, "UNAVAILABLE");
        assert_eq!(error.message, "Google Calendar not configured");

        // A token written later is picked up
        std::fs::write(&token, r#"{"access_token":"late"}"#).unwrap();
        assert_eq!(calendar.load_token().unwrap(), "late");
        assert!(calendar.session().await.is_ok());
    }
}
