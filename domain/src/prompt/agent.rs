//! Prompt templates for specialized agents

use crate::agent::definition::AgentDefinition;
use crate::tool::value_objects::ToolResult;

/// Templates for generating agent prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// System prompt for an agent.
    ///
    /// The tool section is only present when the agent has an allow-list.
    pub fn agent_system(definition: &AgentDefinition) -> String {
        let mut prompt = format!(
            "You are a specialized AI assistant for: {}\n\n",
            definition.description()
        );

        if definition.has_tools() {
            prompt.push_str("You have access to the following tools:\n");
            for tool in definition.allowed_tools() {
                prompt.push_str(&format!("- {}\n", tool));
            }
            prompt.push_str(
                r#"
To use a tool, output a JSON block in this format:
```tool
{"tool": "tool_name", "params": {"param1": "value1"}}
```

You can call multiple tools by outputting multiple tool blocks.
After using tools, explain the results to the user in natural language.

"#,
            );
        }

        prompt.push_str("Be helpful, concise, and accurate in your responses.");
        prompt
    }

    /// Follow-up prompt asking the model to narrate tool results.
    ///
    /// Results are numbered from 1 in call order and rendered in their
    /// uniform JSON shape.
    pub fn synthesis(query: &str, results: &[ToolResult]) -> String {
        let mut prompt = String::from(
            "Based on the tool results below, provide a natural language response to the user's request.\n\n",
        );
        prompt.push_str(&format!("User request: {}\n\n", query));
        prompt.push_str("Tool results:\n");

        for (i, result) in results.iter().enumerate() {
            let json = result.to_json();
            let rendered = serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());
            prompt.push_str(&format!("\nTool {}: {}\n", i + 1, rendered));
        }

        prompt.push_str("\nProvide a clear, helpful response based on these results:");
        prompt
    }
}
