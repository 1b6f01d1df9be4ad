//! Agent manager use case.
//!
//! Owns every [`SpecializedAgent`] plus the [`RouterAgent`] and exposes the
//! two entry points callers use: route-and-execute
//! ([`AgentManager::process_query`]) and forced-agent execution
//! ([`AgentManager::execute_with_agent`]). Both always return an
//! [`AgentResponse`]; failures come back as responses attributed to
//! [`ERROR_AGENT`].

use crate::config::AgentSystemConfig;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::router::RouterAgent;
use crate::use_cases::specialized_agent::{AgentError, SpecializedAgent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use switchboard_domain::{AgentInfo, ConversationMessage};
use tracing::{debug, error, info, warn};

/// `agent_used` value of responses that no agent produced
pub const ERROR_AGENT: &str = "error";

/// Result shape handed back to callers (CLI, chat session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub response: String,
    pub agent_used: String,
    pub tools_used: Vec<String>,
}

impl AgentResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response: message.into(),
            agent_used: ERROR_AGENT.to_string(),
            tools_used: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.agent_used == ERROR_AGENT
    }
}

/// Registry of agents plus the router in front of them
pub struct AgentManager {
    agents: BTreeMap<String, SpecializedAgent>,
    router: RouterAgent,
    gateway: Arc<dyn LlmGateway>,
    models: BTreeSet<String>,
}

impl AgentManager {
    /// Build one agent per definition, then the router.
    ///
    /// Fails when no agents are configured, when a definition is invalid, or
    /// when the router's fallback does not name a configured agent.
    pub fn new(
        config: AgentSystemConfig,
        gateway: Arc<dyn LlmGateway>,
        tools: Arc<dyn ToolExecutorPort>,
    ) -> Result<Self, AgentError> {
        if config.agents.is_empty() {
            return Err(AgentError::NoAgents);
        }
        if !config.agents.contains_key(&config.router.fallback) {
            return Err(AgentError::UnknownFallback(config.router.fallback));
        }

        let mut models = BTreeSet::from([config.router.model.clone()]);
        let mut agents = BTreeMap::new();
        for (name, definition) in config.agents {
            models.insert(definition.model().to_string());
            definition.validate()?;
            for tool in definition.allowed_tools() {
                if !tools.has_tool(tool) {
                    // Calls to it will be refused at call time
                    warn!(agent = %name, "Tool '{}' is not registered", tool);
                }
            }
            agents.insert(
                name,
                SpecializedAgent::new(definition, gateway.clone(), tools.clone()),
            );
        }

        let names: Vec<String> = agents.keys().cloned().collect();
        let descriptions = agents
            .iter()
            .map(|(name, agent)| (name.clone(), agent.description().to_string()))
            .collect();
        let router =
            RouterAgent::new(config.router, names, gateway.clone()).with_descriptions(descriptions);

        info!(
            "Agent manager ready with {} agent(s), fallback '{}'",
            agents.len(),
            router.fallback()
        );
        Ok(Self {
            agents,
            router,
            gateway,
            models,
        })
    }

    /// Ask the backend which models it serves and return the configured
    /// ones it lacks. A backend that cannot be reached is an error.
    ///
    /// A model without a tag also matches the server's `:latest` variant.
    pub async fn missing_models(&self) -> Result<Vec<String>, GatewayError> {
        let available = self.gateway.available_models().await?;
        let missing: Vec<String> = self
            .models
            .iter()
            .filter(|model| {
                !available
                    .iter()
                    .any(|a| a == *model || a.strip_suffix(":latest") == Some(model.as_str()))
            })
            .cloned()
            .collect();
        debug!(
            "Backend serves {} model(s), {} configured model(s) missing",
            available.len(),
            missing.len()
        );
        Ok(missing)
    }

    /// Route the query, then execute it with the chosen agent.
    pub async fn process_query(
        &self,
        query: &str,
        history: &[ConversationMessage],
    ) -> AgentResponse {
        self.process_query_with_progress(query, history, &NoProgress)
            .await
    }

    pub async fn process_query_with_progress(
        &self,
        query: &str,
        history: &[ConversationMessage],
        progress: &dyn ProgressNotifier,
    ) -> AgentResponse {
        progress.on_routing_start();
        let decision = self.router.route(query, history).await;
        progress.on_route_selected(&decision.agent, decision.fell_back);

        self.execute_with_agent_and_progress(&decision.agent, query, history, progress)
            .await
    }

    /// Execute with a named agent, bypassing the router.
    ///
    /// An unknown name yields an error response without any model call.
    pub async fn execute_with_agent(
        &self,
        agent_name: &str,
        query: &str,
        history: &[ConversationMessage],
    ) -> AgentResponse {
        self.execute_with_agent_and_progress(agent_name, query, history, &NoProgress)
            .await
    }

    pub async fn execute_with_agent_and_progress(
        &self,
        agent_name: &str,
        query: &str,
        history: &[ConversationMessage],
        progress: &dyn ProgressNotifier,
    ) -> AgentResponse {
        let Some(agent) = self.agents.get(agent_name) else {
            warn!("Agent '{}' not found", agent_name);
            progress.on_complete();
            return AgentResponse::error(format!("Error: Agent '{}' not found", agent_name));
        };

        let response = match agent.execute_with_progress(query, history, progress).await {
            Ok(output) => AgentResponse {
                response: output.response,
                agent_used: agent_name.to_string(),
                tools_used: output.tools_used,
            },
            Err(e) => {
                error!(agent = agent_name, "Agent failed: {}", e);
                AgentResponse::error(format!("Error: {}", e))
            }
        };
        progress.on_complete();
        response
    }

    /// Description, model and tools of every agent, keyed by name.
    pub fn list_agents(&self) -> BTreeMap<String, AgentInfo> {
        self.agents
            .iter()
            .map(|(name, agent)| (name.clone(), agent.definition().info()))
            .collect()
    }

    pub fn agent_names(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(|k| k.as_str())
    }

    pub fn has_agent(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    pub fn fallback(&self) -> &str {
        self.router.fallback()
    }
}
