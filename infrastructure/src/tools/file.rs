//! File operation tools: read_file, write_file, list_directory,
//! create_directory, delete_file

use super::workspace::Workspace;
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use switchboard_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};

/// Tool name constants
pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";
pub const LIST_DIRECTORY: &str = "list_directory";
pub const CREATE_DIRECTORY: &str = "create_directory";
pub const DELETE_FILE: &str = "delete_file";

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(READ_FILE, "Read the contents of a text file").with_parameter(
        ToolParameter::new("file_path", "Path to the file to read", true).with_type("path"),
    )
}

pub fn write_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE_FILE,
        "Write content to a file, creating parent directories as needed",
    )
    .with_parameter(
        ToolParameter::new("file_path", "Path to the file to write", true).with_type("path"),
    )
    .with_parameter(ToolParameter::new("content", "Content to write", true))
    .with_parameter(
        ToolParameter::new("append", "Append instead of overwriting", false).with_type("boolean"),
    )
}

pub fn list_directory_definition() -> ToolDefinition {
    ToolDefinition::new(LIST_DIRECTORY, "List the entries of a directory").with_parameter(
        ToolParameter::new(
            "dir_path",
            "Directory to list (defaults to the workspace)",
            false,
        )
        .with_type("path"),
    )
}

pub fn create_directory_definition() -> ToolDefinition {
    ToolDefinition::new(CREATE_DIRECTORY, "Create a directory and any missing parents")
        .with_parameter(
            ToolParameter::new("dir_path", "Directory to create", true).with_type("path"),
        )
}

pub fn delete_file_definition() -> ToolDefinition {
    ToolDefinition::new(DELETE_FILE, "Delete a single file").with_parameter(
        ToolParameter::new("file_path", "Path to the file to delete", true).with_type("path"),
    )
}

/// Map an I/O error to a tool failure, keeping permission problems distinct.
pub(crate) fn io_failure(tool: &str, path: &Path, e: io::Error) -> ToolResult {
    let error = match e.kind() {
        io::ErrorKind::NotFound => ToolError::not_found(path.display().to_string()),
        io::ErrorKind::PermissionDenied => {
            ToolError::permission_denied(path.display().to_string())
        }
        _ => ToolError::execution_failed(e.to_string()),
    };
    ToolResult::failure(tool, error)
}

pub fn execute_read_file(workspace: &Workspace, call: &ToolCall) -> ToolResult {
    let raw = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(READ_FILE, ToolError::invalid_argument(e)),
    };
    let path = workspace.resolve(raw);

    match fs::metadata(&path) {
        Ok(m) if m.len() > MAX_READ_SIZE => {
            return ToolResult::failure(
                READ_FILE,
                ToolError::invalid_argument(format!(
                    "File too large ({} bytes). Maximum size is {} bytes",
                    m.len(),
                    MAX_READ_SIZE
                )),
            );
        }
        Ok(_) => {}
        Err(e) => return io_failure(READ_FILE, &path, e),
    }

    match fs::read_to_string(&path) {
        Ok(content) => {
            let size = content.len();
            ToolResult::success(READ_FILE)
                .with_field("content", content)
                .with_field("path", path.display().to_string())
                .with_field("size", size)
        }
        Err(e) => io_failure(READ_FILE, &path, e),
    }
}

pub fn execute_write_file(workspace: &Workspace, call: &ToolCall) -> ToolResult {
    let raw = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(WRITE_FILE, ToolError::invalid_argument(e)),
    };
    let content = match call.require_string("content") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(WRITE_FILE, ToolError::invalid_argument(e)),
    };
    let append = call.get_bool("append").unwrap_or(false);
    let path = workspace.resolve(raw);

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        return io_failure(WRITE_FILE, parent, e);
    }

    let written = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(&path)
        .and_then(|mut file| file.write_all(content.as_bytes()));

    match written {
        Ok(()) => ToolResult::success(WRITE_FILE)
            .with_field("path", path.display().to_string())
            .with_field("bytes_written", content.len())
            .with_field("mode", if append { "appended" } else { "written" }),
        Err(e) => io_failure(WRITE_FILE, &path, e),
    }
}

pub fn execute_list_directory(workspace: &Workspace, call: &ToolCall) -> ToolResult {
    let path = match call.get_string("dir_path") {
        Some(raw) => workspace.resolve(raw),
        None => workspace.root().to_path_buf(),
    };

    let entries = match fs::read_dir(&path) {
        Ok(entries) => entries,
        Err(e) => return io_failure(LIST_DIRECTORY, &path, e),
    };

    let mut items: Vec<(String, Value)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return io_failure(LIST_DIRECTORY, &path, e),
        };
        let name = entry.file_name().to_string_lossy().to_string();
        // Follow symlinks like a plain stat would
        let metadata = fs::metadata(entry.path()).ok();
        let is_dir = metadata.as_ref().is_some_and(|m| m.is_dir());
        let size = metadata.filter(|m| m.is_file()).map(|m| m.len());
        items.push((
            name.clone(),
            json!({
                "name": name,
                "type": if is_dir { "directory" } else { "file" },
                "size": size,
            }),
        ));
    }
    items.sort_by(|a, b| a.0.cmp(&b.0));

    let count = items.len();
    let items: Vec<Value> = items.into_iter().map(|(_, item)| item).collect();
    ToolResult::success(LIST_DIRECTORY)
        .with_field("path", path.display().to_string())
        .with_field("items", items)
        .with_field("count", count)
}

pub fn execute_create_directory(workspace: &Workspace, call: &ToolCall) -> ToolResult {
    let raw = match call.require_string("dir_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(CREATE_DIRECTORY, ToolError::invalid_argument(e)),
    };
    let path = workspace.resolve(raw);

    match fs::create_dir_all(&path) {
        Ok(()) => {
            ToolResult::success(CREATE_DIRECTORY).with_field("path", path.display().to_string())
        }
        Err(e) => io_failure(CREATE_DIRECTORY, &path, e),
    }
}

pub fn execute_delete_file(workspace: &Workspace, call: &ToolCall) -> ToolResult {
    let raw = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(DELETE_FILE, ToolError::invalid_argument(e)),
    };
    let path = workspace.resolve(raw);

    if !path.is_file() {
        return ToolResult::failure(
            DELETE_FILE,
            ToolError::new("NOT_FOUND", "Not a file or doesn't exist"),
        );
    }

    match fs::remove_file(&path) {
        Ok(()) => ToolResult::success(DELETE_FILE).with_field("path", path.display().to_string()),
        Err(e) => io_failure(DELETE_FILE, &path, e),
    }
}
