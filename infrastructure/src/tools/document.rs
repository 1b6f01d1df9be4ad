//! Document tools: extract_text, analyze_document
//!
//! Plain text is read as UTF-8. Other extensions are decoded lossily, except
//! PDF and Word documents which need a parser this build does not ship.

use super::file::io_failure;
use super::workspace::Workspace;
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use switchboard_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};

pub const EXTRACT_TEXT: &str = "extract_text";
pub const ANALYZE_DOCUMENT: &str = "analyze_document";

pub fn extract_text_definition() -> ToolDefinition {
    ToolDefinition::new(EXTRACT_TEXT, "Extract the text content of a document").with_parameter(
        ToolParameter::new("file_path", "Path to the document", true).with_type("path"),
    )
}

pub fn analyze_document_definition() -> ToolDefinition {
    ToolDefinition::new(
        ANALYZE_DOCUMENT,
        "Read a document and report its metadata, text, word and line counts",
    )
    .with_parameter(ToolParameter::new("file_path", "Path to the document", true).with_type("path"))
}

/// Lower-cased extension with its leading dot, or `""`.
fn extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn read_text(tool: &str, path: &Path, ext: &str) -> Result<String, ToolResult> {
    match ext {
        ".txt" => fs::read_to_string(path).map_err(|e| io_failure(tool, path, e)),
        ".pdf" => Err(ToolResult::failure(
            tool,
            ToolError::unavailable("PDF text extraction is not available"),
        )),
        ".docx" | ".doc" => Err(ToolResult::failure(
            tool,
            ToolError::unavailable("Word document extraction is not available"),
        )),
        _ => fs::read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|e| io_failure(tool, path, e)),
    }
}

pub fn execute_extract_text(workspace: &Workspace, call: &ToolCall) -> ToolResult {
    let raw = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(EXTRACT_TEXT, ToolError::invalid_argument(e)),
    };
    let path = workspace.resolve(raw);
    let ext = extension(&path);

    match read_text(EXTRACT_TEXT, &path, &ext) {
        Ok(text) => {
            let length = text.chars().count();
            ToolResult::success(EXTRACT_TEXT)
                .with_field("text", text)
                .with_field("path", path.display().to_string())
                .with_field("length", length)
                .with_field("format", ext)
        }
        Err(failure) => failure,
    }
}

fn local_timestamp(time: std::io::Result<SystemTime>) -> Option<String> {
    time.ok()
        .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%dT%H:%M:%S%.6f").to_string())
}

pub fn execute_analyze_document(workspace: &Workspace, call: &ToolCall) -> ToolResult {
    let raw = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(ANALYZE_DOCUMENT, ToolError::invalid_argument(e)),
    };
    let path = workspace.resolve(raw);
    let ext = extension(&path);

    let text = match read_text(ANALYZE_DOCUMENT, &path, &ext) {
        Ok(text) => text,
        Err(failure) => return failure,
    };
    let metadata = match fs::metadata(&path) {
        Ok(m) => m,
        Err(e) => return io_failure(ANALYZE_DOCUMENT, &path, e),
    };

    // Creation time is not tracked on every filesystem
    let created = local_timestamp(metadata.created()).or_else(|| local_timestamp(metadata.modified()));
    let word_count = text.split_whitespace().count();
    let line_count = text.split('\n').count();

    ToolResult::success(ANALYZE_DOCUMENT)
        .with_field("path", path.display().to_string())
        .with_field("size", metadata.len())
        .with_field("created", created)
        .with_field("modified", local_timestamp(metadata.modified()))
        .with_field("format", ext)
        .with_field("text", text)
        .with_field("word_count", word_count)
        .with_field("line_count", line_count)
}
