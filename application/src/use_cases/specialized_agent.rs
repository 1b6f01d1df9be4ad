//! Specialized agent use case.
//!
//! A [`SpecializedAgent`] answers one query with its own model, temperature
//! and tool allow-list, in up to two model calls:
//!
//! 1. **Primary pass**: system prompt, trailing history window, the query.
//! 2. Tool blocks in the primary reply are extracted and run one at a time,
//!    in textual order, each behind the capability gate.
//! 3. **Synthesis pass** (only when at least one block was extracted): the
//!    primary input plus the primary reply, followed by a prompt embedding
//!    the query and every tool result, so the model can narrate them.

use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::tool_executor::ToolExecutorPort;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use switchboard_domain::util::truncate_str;
use switchboard_domain::{
    AgentDefinition, AgentPromptTemplate, ConversationMessage, DomainError, Message, ToolAccess,
    ToolCall, ToolError, ToolResult, extract_tool_calls, history_window,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised by agents and the agent manager
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("No agents configured")]
    NoAgents,

    #[error("Fallback agent '{0}' is not configured")]
    UnknownFallback(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// What an agent produced for one query
#[derive(Debug, Clone)]
pub struct AgentOutput {
    /// Final user-facing text (synthesis reply when tools were requested)
    pub response: String,
    /// Names of every extracted tool call, in call order, refused or not
    pub tools_used: Vec<String>,
    /// One result per entry of `tools_used`
    pub tool_results: Vec<ToolResult>,
}

/// One bound (model, allowed tools, description) unit
pub struct SpecializedAgent {
    definition: AgentDefinition,
    gateway: Arc<dyn LlmGateway>,
    tools: Arc<dyn ToolExecutorPort>,
}

impl SpecializedAgent {
    pub fn new(
        definition: AgentDefinition,
        gateway: Arc<dyn LlmGateway>,
        tools: Arc<dyn ToolExecutorPort>,
    ) -> Self {
        Self {
            definition,
            gateway,
            tools,
        }
    }

    pub fn definition(&self) -> &AgentDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn description(&self) -> &str {
        self.definition.description()
    }

    /// Answer `query` given the caller's history.
    ///
    /// Only gateway failures are returned as errors. Malformed tool blocks,
    /// refused calls and failing tools all end up as data.
    pub async fn execute(
        &self,
        query: &str,
        history: &[ConversationMessage],
    ) -> Result<AgentOutput, AgentError> {
        self.execute_with_progress(query, history, &NoProgress).await
    }

    /// Same as [`execute`](Self::execute), reporting progress as it goes.
    pub async fn execute_with_progress(
        &self,
        query: &str,
        history: &[ConversationMessage],
        progress: &dyn ProgressNotifier,
    ) -> Result<AgentOutput, AgentError> {
        info!(
            agent = self.name(),
            "Executing query: {}",
            truncate_str(query, 100)
        );
        progress.on_agent_start(self.name());

        let messages = self.build_messages(query, history);
        let primary = self.chat(messages.clone()).await?;

        let calls = extract_tool_calls(&primary);
        if calls.is_empty() {
            debug!(agent = self.name(), "No tool calls, returning primary response");
            return Ok(AgentOutput {
                response: primary,
                tools_used: Vec::new(),
                tool_results: Vec::new(),
            });
        }

        debug!(
            agent = self.name(),
            "Extracted {} tool call(s) from primary response",
            calls.len()
        );

        let mut tools_used = Vec::with_capacity(calls.len());
        let mut tool_results = Vec::with_capacity(calls.len());
        for call in &calls {
            progress.on_tool_start(&call.tool_name);
            let result = self.run_tool(call).await;
            progress.on_tool_complete(&call.tool_name, result.is_success());
            tools_used.push(call.tool_name.clone());
            tool_results.push(result);
        }

        progress.on_synthesis_start(self.name());
        let mut synthesis_messages = messages;
        synthesis_messages.push(Message::assistant(primary));
        synthesis_messages.push(Message::user(AgentPromptTemplate::synthesis(
            query,
            &tool_results,
        )));
        let response = self.chat(synthesis_messages).await?;

        Ok(AgentOutput {
            response,
            tools_used,
            tool_results,
        })
    }

    /// System prompt, trailing history window, then the query.
    fn build_messages(&self, query: &str, history: &[ConversationMessage]) -> Vec<Message> {
        let window = history_window(history);
        if window.len() < history.len() {
            debug!(
                agent = self.name(),
                "Dropping {} older history message(s)",
                history.len() - window.len()
            );
        }

        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(Message::system(AgentPromptTemplate::agent_system(
            &self.definition,
        )));
        messages.extend(window.iter().map(ConversationMessage::to_message));
        messages.push(Message::user(query));
        messages
    }

    async fn chat(&self, messages: Vec<Message>) -> Result<String, GatewayError> {
        let request = ChatRequest::new(
            self.definition.model(),
            messages,
            self.definition.temperature(),
        );
        self.gateway.chat(&request).await
    }

    /// Run one call behind the capability gate.
    ///
    /// Executor errors and panics are converted into failed results so a
    /// broken tool never takes sibling calls down with it.
    async fn run_tool(&self, call: &ToolCall) -> ToolResult {
        let spec = self.tools.tool_spec();
        if let Err(denial) = ToolAccess::check(spec, &self.definition, &call.tool_name) {
            warn!(agent = self.name(), "Refusing tool call: {}", denial);
            return ToolResult::failure(&call.tool_name, denial.into());
        }

        debug!(agent = self.name(), tool = %call.tool_name, "Executing tool");
        let outcome = AssertUnwindSafe(self.tools.execute(call))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                ToolResult::failure(&call.tool_name, ToolError::execution_failed(e.to_string()))
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "tool panicked".to_string());
                ToolResult::failure(&call.tool_name, ToolError::execution_failed(message))
            }
        };

        if let Some(error) = result.error() {
            warn!(agent = self.name(), tool = %call.tool_name, "Tool failed: {}", error);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeGateway, FakeTools, Scripted, failed};
    use serde_json::json;
    use switchboard_domain::Role;

    const WRITE_BLOCK: &str = "Saving it now.\n```tool\n{\"tool\": \"write_file\", \"params\": {\"file_path\": \"a.txt\", \"content\": \"hi\"}}\n```\n";

    fn file_manager() -> AgentDefinition {
        AgentDefinition::new("file_manager", "ministral:3b")
            .with_description("File operations")
            .with_temperature(0.3)
            .with_tools(["write_file"])
    }

    fn agent(
        definition: AgentDefinition,
        gateway: &Arc<FakeGateway>,
        tools: &Arc<FakeTools>,
    ) -> SpecializedAgent {
        SpecializedAgent::new(definition, gateway.clone(), tools.clone())
    }

    #[tokio::test]
    async fn test_plain_reply_is_returned_unchanged() {
        let gateway = Arc::new(FakeGateway::new().with_reply("Hello there"));
        let tools = Arc::new(FakeTools::new(["write_file"]));

        let output = agent(file_manager(), &gateway, &tools)
            .execute("hi", &[])
            .await
            .unwrap();

        assert_eq!(output.response, "Hello there");
        assert!(output.tools_used.is_empty());
        assert_eq!(gateway.request_count(), 1);
        assert!(tools.calls().is_empty());
    }

    #[tokio::test]
    async fn test_primary_request_shape() {
        let gateway = Arc::new(FakeGateway::new());
        let tools = Arc::new(FakeTools::new(["write_file"]));

        agent(file_manager(), &gateway, &tools)
            .execute("save my notes", &[])
            .await
            .unwrap();

        let request = &gateway.requests()[0];
        assert_eq!(request.model, "ministral:3b");
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.contains("- write_file\n"));
        assert_eq!(request.messages[1], Message::user("save my notes"));
    }

    #[tokio::test]
    async fn test_write_file_scenario() {
        let gateway = Arc::new(
            FakeGateway::new()
                .with_reply(WRITE_BLOCK)
                .with_reply("I saved a.txt for you."),
        );
        let tools = Arc::new(FakeTools::new(["write_file", "read_file"]));

        let output = agent(file_manager(), &gateway, &tools)
            .execute("write hi to a.txt", &[])
            .await
            .unwrap();

        let calls = tools.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            ToolCall::new("write_file")
                .with_arg("file_path", "a.txt")
                .with_arg("content", "hi")
        );
        assert_eq!(output.tools_used, vec!["write_file"]);
        assert_eq!(output.response, "I saved a.txt for you.");
        assert!(output.tool_results[0].is_success());

        // Synthesis reuses the primary input, then the primary reply, then the prompt
        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        let synthesis = &requests[1].messages;
        assert_eq!(synthesis.len(), 4);
        assert_eq!(synthesis[..2], requests[0].messages[..]);
        assert_eq!(synthesis[2], Message::assistant(WRITE_BLOCK));
        assert!(synthesis[3].content.contains("User request: write hi to a.txt"));
        assert!(synthesis[3].content.contains("Tool 1:"));
        assert_eq!(requests[1].temperature, 0.3);
    }

    #[tokio::test]
    async fn test_agent_without_tools_refuses_but_synthesizes() {
        let gateway = Arc::new(
            FakeGateway::new()
                .with_reply(WRITE_BLOCK)
                .with_reply("I can't write files."),
        );
        let tools = Arc::new(FakeTools::new(["write_file"]));
        let general = AgentDefinition::new("general", "m").with_description("General");

        let output = agent(general, &gateway, &tools)
            .execute("write hi to a.txt", &[])
            .await
            .unwrap();

        assert!(tools.calls().is_empty());
        assert_eq!(output.tools_used, vec!["write_file"]);
        assert!(!output.tool_results[0].is_success());
        assert_eq!(
            output.tool_results[0].error().unwrap().message,
            "Tool write_file not available to this agent"
        );
        assert_eq!(output.response, "I can't write files.");

        let synthesis = &gateway.requests()[1].messages[3].content;
        assert!(synthesis.contains("not available to this agent"));
    }

    #[tokio::test]
    async fn test_unregistered_tool_is_refused() {
        let gateway = Arc::new(FakeGateway::new().with_reply(
            "```tool\n{\"tool\": \"launch_rockets\", \"params\": {}}\n```",
        ));
        let tools = Arc::new(FakeTools::new(["write_file"]));
        let definition = file_manager().with_tools(["launch_rockets"]);

        let output = agent(definition, &gateway, &tools)
            .execute("go", &[])
            .await
            .unwrap();

        assert!(tools.calls().is_empty());
        assert_eq!(output.tools_used, vec!["launch_rockets"]);
        let error = output.tool_results[0].error().unwrap();
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.message, "Tool launch_rockets not found");
        assert_eq!(gateway.request_count(), 2);
    }

    #[tokio::test]
    async fn test_history_window_keeps_last_ten() {
        let gateway = Arc::new(FakeGateway::new());
        let tools = Arc::new(FakeTools::new(Vec::<String>::new()));
        let history: Vec<ConversationMessage> = (0..15)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationMessage::user(format!("msg {}", i))
                } else {
                    ConversationMessage::assistant(format!("msg {}", i), "general")
                }
            })
            .collect();

        agent(AgentDefinition::new("general", "m"), &gateway, &tools)
            .execute("now", &history)
            .await
            .unwrap();

        let messages = &gateway.requests()[0].messages;
        // system + 10 history + query
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[1].content, "msg 5");
        assert_eq!(messages[10].content, "msg 14");
        assert_eq!(messages[11], Message::user("now"));
    }

    #[tokio::test]
    async fn test_malformed_block_is_dropped() {
        let reply = "```tool\n{\"tool\": \"write_file\", \"params\": \n```\n\
                     ```tool\n{\"tool\": \"write_file\", \"params\": {\"file_path\": \"b.txt\", \"content\": \"x\"}}\n```";
        let gateway = Arc::new(FakeGateway::new().with_reply(reply));
        let tools = Arc::new(FakeTools::new(["write_file"]));

        let output = agent(file_manager(), &gateway, &tools)
            .execute("go", &[])
            .await
            .unwrap();

        assert_eq!(output.tool_results.len(), 1);
        assert_eq!(tools.calls()[0].get_string("file_path"), Some("b.txt"));
    }

    #[tokio::test]
    async fn test_calls_run_in_textual_order() {
        let reply = "```tool\n{\"tool\": \"write_file\", \"params\": {\"file_path\": \"a\"}}\n```\n\
                     ```tool\n{\"tool\": \"read_file\", \"params\": {\"file_path\": \"a\"}}\n```";
        let gateway = Arc::new(FakeGateway::new().with_reply(reply));
        let tools = Arc::new(FakeTools::new(["write_file", "read_file"]));
        let definition = file_manager().with_tools(["read_file", "write_file"]);

        let output = agent(definition, &gateway, &tools)
            .execute("go", &[])
            .await
            .unwrap();

        assert_eq!(tools.call_names(), vec!["write_file", "read_file"]);
        assert_eq!(output.tools_used, vec!["write_file", "read_file"]);
    }

    #[tokio::test]
    async fn test_tool_error_and_panic_do_not_abort_siblings() {
        let reply = "```tool\n{\"tool\": \"read_file\", \"params\": {}}\n```\n\
                     ```tool\n{\"tool\": \"list_directory\", \"params\": {}}\n```\n\
                     ```tool\n{\"tool\": \"write_file\", \"params\": {\"file_path\": \"c\"}}\n```";
        let gateway = Arc::new(FakeGateway::new().with_reply(reply));
        let tools = Arc::new(
            FakeTools::new(["read_file", "list_directory", "write_file"])
                .script("read_file", Scripted::Error("disk on fire".to_string()))
                .script("list_directory", Scripted::Panic("boom".to_string())),
        );
        let definition =
            file_manager().with_tools(["read_file", "list_directory", "write_file"]);

        let output = agent(definition, &gateway, &tools)
            .execute("go", &[])
            .await
            .unwrap();

        assert_eq!(tools.calls().len(), 3);
        assert_eq!(output.tools_used.len(), 3);
        assert_eq!(
            output.tool_results[0].to_json(),
            json!({"success": false, "error": "disk on fire"})
        );
        assert_eq!(output.tool_results[1].error().unwrap().message, "boom");
        assert!(output.tool_results[2].is_success());
    }

    #[tokio::test]
    async fn test_failed_result_from_tool_passes_through() {
        let gateway = Arc::new(FakeGateway::new().with_reply(WRITE_BLOCK));
        let tools = Arc::new(
            FakeTools::new(["write_file"])
                .script("write_file", Scripted::Result(failed("write_file", "read-only"))),
        );

        let output = agent(file_manager(), &gateway, &tools)
            .execute("go", &[])
            .await
            .unwrap();

        assert_eq!(output.tools_used, vec!["write_file"]);
        assert_eq!(output.tool_results[0].error().unwrap().message, "read-only");
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let gateway = Arc::new(FakeGateway::new().with_error(GatewayError::Timeout));
        let tools = Arc::new(FakeTools::new(["write_file"]));

        let result = agent(file_manager(), &gateway, &tools)
            .execute("go", &[])
            .await;

        assert!(matches!(result, Err(AgentError::Gateway(GatewayError::Timeout))));
    }

    #[tokio::test]
    async fn test_synthesis_failure_propagates() {
        let gateway = Arc::new(
            FakeGateway::new()
                .with_reply(WRITE_BLOCK)
                .with_error(GatewayError::ConnectionError("refused".to_string())),
        );
        let tools = Arc::new(FakeTools::new(["write_file"]));

        let result = agent(file_manager(), &gateway, &tools)
            .execute("go", &[])
            .await;

        assert!(matches!(result, Err(AgentError::Gateway(_))));
        assert_eq!(tools.calls().len(), 1);
    }
}
