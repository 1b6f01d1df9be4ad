//! Chat session use case.
//!
//! The agent system only reads history; [`ChatSession`] is the caller that
//! owns it. Each query appends the user turn, runs the manager over the
//! history (which therefore already ends with that turn), and appends the
//! assistant turn with the agent and tools that produced it.

use crate::config::ChatConfig;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::agent_manager::{AgentManager, AgentResponse};
use std::sync::Arc;
use switchboard_domain::{ConversationMessage, Role};
use tracing::debug;

/// The last answered query, as needed by "save last response" features
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exchange<'a> {
    /// User turn immediately preceding the response, if any
    pub query: Option<&'a str>,
    pub response: &'a ConversationMessage,
}

/// Multi-turn conversation over an [`AgentManager`]
pub struct ChatSession {
    manager: Arc<AgentManager>,
    config: ChatConfig,
    history: Vec<ConversationMessage>,
}

impl ChatSession {
    pub fn new(manager: Arc<AgentManager>) -> Self {
        Self {
            manager,
            config: ChatConfig::default(),
            history: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ChatConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable history. Without history every query is sent alone
    /// and nothing is recorded.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.config.use_history = enabled;
        self
    }

    pub fn manager(&self) -> &AgentManager {
        &self.manager
    }

    pub fn uses_history(&self) -> bool {
        self.config.use_history
    }

    /// Route and answer `prompt`.
    pub async fn query(&mut self, prompt: &str) -> AgentResponse {
        self.query_with_progress(prompt, &NoProgress).await
    }

    pub async fn query_with_progress(
        &mut self,
        prompt: &str,
        progress: &dyn ProgressNotifier,
    ) -> AgentResponse {
        self.record_user(prompt);
        let response = self
            .manager
            .process_query_with_progress(prompt, self.context(), progress)
            .await;
        self.record_response(&response);
        response
    }

    /// Answer `prompt` with a named agent, bypassing the router.
    pub async fn query_with_agent(&mut self, agent_name: &str, prompt: &str) -> AgentResponse {
        self.query_with_agent_and_progress(agent_name, prompt, &NoProgress)
            .await
    }

    pub async fn query_with_agent_and_progress(
        &mut self,
        agent_name: &str,
        prompt: &str,
        progress: &dyn ProgressNotifier,
    ) -> AgentResponse {
        self.record_user(prompt);
        let response = self
            .manager
            .execute_with_agent_and_progress(agent_name, prompt, self.context(), progress)
            .await;
        self.record_response(&response);
        response
    }

    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        debug!("Clearing {} history message(s)", self.history.len());
        self.history.clear();
    }

    /// The most recent assistant message and the user turn before it.
    pub fn last_exchange(&self) -> Option<Exchange<'_>> {
        let index = self
            .history
            .iter()
            .rposition(|m| m.role == Role::Assistant)?;
        let query = index
            .checked_sub(1)
            .map(|i| &self.history[i])
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str());
        Some(Exchange {
            query,
            response: &self.history[index],
        })
    }

    fn context(&self) -> &[ConversationMessage] {
        if self.config.use_history {
            &self.history
        } else {
            &[]
        }
    }

    fn record_user(&mut self, prompt: &str) {
        if self.config.use_history {
            self.history.push(ConversationMessage::user(prompt));
        }
    }

    /// Failed queries leave only the user turn behind.
    fn record_response(&mut self, response: &AgentResponse) {
        if self.config.use_history && !response.is_error() {
            self.history.push(
                ConversationMessage::assistant(&response.response, &response.agent_used)
                    .with_tools_used(response.tools_used.clone()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentSystemConfig;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::{FakeGateway, FakeTools};
    use switchboard_domain::{AgentDefinition, Message, RouterDefinition};

    fn session(gateway: &Arc<FakeGateway>) -> ChatSession {
        let config = AgentSystemConfig::new(RouterDefinition::new("router"))
            .with_agent(AgentDefinition::new("general", "agent").with_description("General"))
            .with_agent(
                AgentDefinition::new("file_manager", "agent")
                    .with_description("Files")
                    .with_tools(["write_file"]),
            );
        let manager =
            AgentManager::new(config, gateway.clone(), Arc::new(FakeTools::new(["write_file"])))
                .unwrap();
        ChatSession::new(Arc::new(manager))
    }

    #[tokio::test]
    async fn test_query_records_both_turns() {
        let gateway = Arc::new(FakeGateway::new().with_reply("general").with_reply("Hi!"));
        let mut session = session(&gateway);

        let response = session.query("hello").await;

        assert_eq!(response.response, "Hi!");
        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].content, "hello");
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].agent_used.as_deref(), Some("general"));
    }

    #[tokio::test]
    async fn test_history_includes_current_turn() {
        let gateway = Arc::new(FakeGateway::new().with_default_reply("general"));
        let mut session = session(&gateway);

        session.query("first").await;
        session.query("second").await;

        // The second agent request: system, first, reply, second (history), second (query)
        let agent_requests = gateway.requests_for("agent");
        let messages = &agent_requests[1].messages;
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[1], Message::user("first"));
        assert_eq!(messages[3], Message::user("second"));
        assert_eq!(messages[4], Message::user("second"));
    }

    #[tokio::test]
    async fn test_without_history() {
        let gateway = Arc::new(FakeGateway::new().with_default_reply("general"));
        let mut session = session(&gateway).with_history(false);

        session.query("first").await;
        session.query("second").await;

        assert!(session.history().is_empty());
        let agent_requests = gateway.requests_for("agent");
        assert_eq!(agent_requests[1].messages.len(), 2);
    }

    #[tokio::test]
    async fn test_query_with_agent_skips_router() {
        let gateway = Arc::new(FakeGateway::new().with_reply("Done."));
        let mut session = session(&gateway);

        let response = session.query_with_agent("file_manager", "list files").await;

        assert_eq!(response.agent_used, "file_manager");
        assert!(gateway.requests_for("router").is_empty());
        assert_eq!(
            session.history()[1].agent_used.as_deref(),
            Some("file_manager")
        );
    }

    #[tokio::test]
    async fn test_error_response_keeps_only_user_turn() {
        let gateway = Arc::new(
            FakeGateway::new()
                .with_reply("general")
                .with_error(GatewayError::Timeout),
        );
        let mut session = session(&gateway);

        let response = session.query("hello").await;

        assert!(response.is_error());
        assert_eq!(response.response, "Error: Gateway error: Timeout");
        assert_eq!(session.history().len(), 1);
        assert!(session.last_exchange().is_none());
    }

    #[tokio::test]
    async fn test_last_exchange_and_clear() {
        let gateway = Arc::new(
            FakeGateway::new()
                .with_reply("general")
                .with_reply("one")
                .with_reply("general")
                .with_reply("two"),
        );
        let mut session = session(&gateway);

        session.query("q1").await;
        session.query("q2").await;

        let exchange = session.last_exchange().unwrap();
        assert_eq!(exchange.query, Some("q2"));
        assert_eq!(exchange.response.content, "two");

        session.clear_history();
        assert!(session.history().is_empty());
        assert!(session.last_exchange().is_none());
    }
}
