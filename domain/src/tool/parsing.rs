//! Tool-call extraction from free-form model output.
//!
//! Models request tools by emitting fenced blocks tagged `tool`:
//!
//! ````text
//! ```tool
//! {"tool": "write_file", "params": {"file_path": "a.txt", "content": "hi"}}
//! ```
//! ````
//!
//! A block ends at the first following line that starts with three
//! backticks, even when text follows them on that line (```` ``` Done. ````).
//!
//! Extraction is best effort. A block whose body is not a JSON object with a
//! string `tool` key is skipped, as is a block that is never closed. Nothing
//! here returns an error.

use super::entities::ToolCall;

const TOOL_FENCE: &str = "```tool";
const CLOSING_FENCE: &str = "```";

/// Extract every well-formed tool call from `text`, in textual order.
pub fn extract_tool_calls(text: &str) -> Vec<ToolCall> {
    let mut calls = Vec::new();
    let mut in_tool_block = false;
    let mut current_block = String::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if in_tool_block && trimmed.starts_with(CLOSING_FENCE) {
            in_tool_block = false;
            if let Some(call) = parse_tool_block(&current_block) {
                calls.push(call);
            }
        } else if trimmed == TOOL_FENCE {
            in_tool_block = true;
            current_block.clear();
        } else if in_tool_block {
            current_block.push_str(line);
            current_block.push('\n');
        }
    }

    calls
}

/// Parse the body of one tool block.
fn parse_tool_block(block: &str) -> Option<ToolCall> {
    let parsed: serde_json::Value = serde_json::from_str(block.trim()).ok()?;
    let tool_name = parsed.get("tool")?.as_str()?;

    let mut call = ToolCall::new(tool_name);
    if let Some(params) = parsed.get("params").and_then(|v| v.as_object()) {
        for (key, value) in params {
            call = call.with_arg(key, value.clone());
        }
    }
    Some(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_block() {
        let text = "I'll save that for you.\n```tool\n{\"tool\": \"write_file\", \"params\": {\"file_path\": \"a.txt\", \"content\": \"hi\"}}\n```\nDone.";
        let calls = extract_tool_calls(text);

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "write_file");
        assert_eq!(calls[0].arguments.len(), 2);
        assert_eq!(calls[0].arguments["file_path"], json!("a.txt"));
        assert_eq!(calls[0].arguments["content"], json!("hi"));
    }

    #[test]
    fn test_multiple_blocks_keep_order() {
        let text = r#"
```tool
{"tool": "write_file", "params": {"file_path": "notes.txt", "content": "x"}}
```
then
```tool
{"tool": "read_file", "params": {"file_path": "notes.txt"}}
```
"#;
        let names: Vec<_> = extract_tool_calls(text)
            .into_iter()
            .map(|c| c.tool_name)
            .collect();
        assert_eq!(names, vec!["write_file", "read_file"]);
    }

    #[test]
    fn test_closing_fence_followed_by_text() {
        let text = "```tool\n{\"tool\": \"list_events\"}\n``` Let me know.";
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "list_events");

        let text = "```tool\n{\"tool\": \"write_file\", \"params\": {\"file_path\": \"a.txt\", \"content\": \"x\"}}\n```  (saving)\n```tool\n{\"tool\": \"read_file\", \"params\": {\"file_path\": \"a.txt\"}}\n```";
        let names: Vec<_> = extract_tool_calls(text)
            .into_iter()
            .map(|c| c.tool_name)
            .collect();
        assert_eq!(names, vec!["write_file", "read_file"]);
    }

    #[test]
    fn test_malformed_block_is_dropped() {
        let text = r#"
```tool
{"tool": "list_directory", "params": {}}
```
```tool
{"tool": "write_file", "params": {"file_path": "a.txt",
```
"#;
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "list_directory");
    }

    #[test]
    fn test_block_without_tool_key_is_dropped() {
        let text = "```tool\n{\"name\": \"read_file\", \"params\": {}}\n```";
        assert!(extract_tool_calls(text).is_empty());

        let text = "```tool\n{\"tool\": 42}\n```";
        assert!(extract_tool_calls(text).is_empty());

        let text = "```tool\n[\"tool\"]\n```";
        assert!(extract_tool_calls(text).is_empty());
    }

    #[test]
    fn test_missing_or_non_object_params() {
        let text = "```tool\n{\"tool\": \"list_events\"}\n```\n```tool\n{\"tool\": \"list_directory\", \"params\": \"docs\"}\n```";
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 2);
        assert!(calls[0].arguments.is_empty());
        assert!(calls[1].arguments.is_empty());
    }

    #[test]
    fn test_unterminated_block_is_dropped() {
        let text = "```tool\n{\"tool\": \"read_file\", \"params\": {}}\n";
        assert!(extract_tool_calls(text).is_empty());
    }

    #[test]
    fn test_other_fences_ignored() {
        let text = "```python\nprint('hi')\n```\n```json\n{\"tool\": \"read_file\"}\n```";
        assert!(extract_tool_calls(text).is_empty());
    }

    #[test]
    fn test_multiline_json_and_crlf() {
        let text = "```tool\r\n{\r\n  \"tool\": \"web_search\",\r\n  \"params\": {\"query\": \"rust\"}\r\n}\r\n```\r\n";
        let calls = extract_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get_string("query"), Some("rust"));
    }

    #[test]
    fn test_no_blocks() {
        assert!(extract_tool_calls("Just a plain answer.").is_empty());
        assert!(extract_tool_calls("").is_empty());
    }
}
