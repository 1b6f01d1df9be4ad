//! Tool domain value objects: immutable result and error types
//!
//! Every tool produces a [`ToolResult`] whose wire shape is uniform across
//! tools: `{"success": true, ...payload}` on success and
//! `{"success": false, "error": "<message>"}` on failure. Tool failures are
//! data, never propagated errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error that occurred while handling a tool call.
///
/// | Code | Description |
/// |------|-------------|
/// | `NOT_FOUND` | Unknown tool or missing resource |
/// | `PERMISSION_DENIED` | Tool not allowed for the agent, or OS-level denial |
/// | `INVALID_ARGUMENT` | Missing/unknown/wrong parameters |
/// | `EXECUTION_FAILED` | Runtime failure (I/O error, HTTP error, panic) |
/// | `TIMEOUT` | Operation timed out |
/// | `UNAVAILABLE` | Backing service not configured or not compiled in |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "PERMISSION_DENIED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("File not found: {}", resource.into()))
    }

    pub fn permission_denied(resource: impl Into<String>) -> Self {
        Self::new(
            "PERMISSION_DENIED",
            format!("Permission denied: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new("TIMEOUT", operation)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new("UNAVAILABLE", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool call.
///
/// Produced by the tool executor (or by the capability gate when a call is
/// refused) and fed verbatim into the synthesis prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was called
    pub tool_name: String,
    /// Whether the call succeeded
    pub success: bool,
    /// Tool-specific fields (success only)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
    /// Error information (failure only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Create a successful result with an empty payload
    pub fn success(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            payload: Map::new(),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            payload: Map::new(),
            error: Some(error),
        }
    }

    /// Add a payload field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Check if the call was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get a payload field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// The uniform wire shape of this result.
    ///
    /// A payload key named `success` cannot override the flag.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("success".to_string(), Value::Bool(self.success));
        if self.success {
            for (key, value) in &self.payload {
                if key != "success" {
                    object.insert(key.clone(), value.clone());
                }
            }
        } else {
            let message = self
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Unknown error".to_string());
            object.insert("error".to_string(), Value::String(message));
        }
        Value::Object(object)
    }
}
