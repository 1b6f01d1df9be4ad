//! Code execution tool: execute_code
//!
//! Only Python is supported. The code is written to a temporary `.py` file
//! and run with `python3` under a wall-clock limit. A non-zero exit status is
//! still a successful tool call; the model sees the return code.

use std::io::Write;
use std::time::Duration;
use switchboard_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use tokio::process::Command;
use tracing::debug;

pub const EXECUTE_CODE: &str = "execute_code";

const PYTHON: &str = "python3";

pub fn execute_code_definition() -> ToolDefinition {
    ToolDefinition::new(
        EXECUTE_CODE,
        "Run a short program and return its stdout, stderr and return code",
    )
    .with_parameter(ToolParameter::new("code", "Source code to run", true))
    .with_parameter(ToolParameter::new(
        "language",
        "Programming language (only \"python\" is supported)",
        false,
    ))
}

pub async fn execute_execute_code(call: &ToolCall, timeout: Duration) -> ToolResult {
    let code = match call.require_string("code") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(EXECUTE_CODE, ToolError::invalid_argument(e)),
    };
    let language = call.get_string("language").unwrap_or("python");
    if language != "python" {
        return ToolResult::failure(
            EXECUTE_CODE,
            ToolError::invalid_argument(format!("Language {} not supported", language)),
        );
    }

    // Removed when dropped, after the child has exited or been killed
    let script = match tempfile::Builder::new()
        .prefix("switchboard-")
        .suffix(".py")
        .tempfile()
        .and_then(|mut file| file.write_all(code.as_bytes()).map(|()| file))
    {
        Ok(file) => file,
        Err(e) => {
            return ToolResult::failure(
                EXECUTE_CODE,
                ToolError::execution_failed(format!("Failed to write script: {}", e)),
            );
        }
    };

    debug!("Running {} {}", PYTHON, script.path().display());
    let child = Command::new(PYTHON)
        .arg(script.path())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout, child).await {
        Ok(Ok(output)) => ToolResult::success(EXECUTE_CODE)
            .with_field("stdout", String::from_utf8_lossy(&output.stdout).into_owned())
            .with_field("stderr", String::from_utf8_lossy(&output.stderr).into_owned())
            .with_field("return_code", output.status.code()),
        Ok(Err(e)) => ToolResult::failure(
            EXECUTE_CODE,
            ToolError::execution_failed(format!("Failed to run {}: {}", PYTHON, e)),
        ),
        Err(_) => ToolResult::failure(EXECUTE_CODE, ToolError::timeout("Code execution timeout")),
    }
}
