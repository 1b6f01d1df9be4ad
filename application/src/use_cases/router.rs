//! Router use case.
//!
//! Asks a small, low-temperature model which agent should take a query.
//! The answer is normalized and must match an agent name exactly; anything
//! else, including a gateway failure, resolves to the fallback agent.

use crate::ports::llm_gateway::{ChatRequest, LlmGateway};
use std::collections::BTreeMap;
use std::sync::Arc;
use switchboard_domain::util::truncate_str;
use switchboard_domain::{
    ConversationMessage, Message, RouteDecision, RouterDefinition, RouterPromptTemplate,
    normalize_route,
};
use tracing::{debug, warn};

/// Model-backed classifier choosing one agent per query
pub struct RouterAgent {
    definition: RouterDefinition,
    agent_names: Vec<String>,
    descriptions: BTreeMap<String, String>,
    gateway: Arc<dyn LlmGateway>,
}

impl RouterAgent {
    /// Create a router that knows the agent names but no descriptions yet.
    pub fn new(
        definition: RouterDefinition,
        agent_names: Vec<String>,
        gateway: Arc<dyn LlmGateway>,
    ) -> Self {
        Self {
            definition,
            agent_names,
            descriptions: BTreeMap::new(),
            gateway,
        }
    }

    /// Set the descriptions shown to the routing model.
    pub fn with_descriptions(mut self, descriptions: BTreeMap<String, String>) -> Self {
        self.descriptions = descriptions;
        self
    }

    pub fn fallback(&self) -> &str {
        &self.definition.fallback
    }

    pub fn agent_names(&self) -> &[String] {
        &self.agent_names
    }

    /// Pick the agent for `query`.
    ///
    /// Never fails: routing problems are logged and resolve to the fallback.
    /// The history is accepted for interface symmetry with agents but is not
    /// shown to the routing model.
    pub async fn route(&self, query: &str, _history: &[ConversationMessage]) -> RouteDecision {
        let request = ChatRequest::new(
            self.definition.model.clone(),
            vec![
                Message::system(RouterPromptTemplate::system(
                    self.descriptions
                        .iter()
                        .map(|(name, description)| (name.as_str(), description.as_str())),
                    self.fallback(),
                )),
                Message::user(RouterPromptTemplate::user(query)),
            ],
            self.definition.temperature,
        );

        let decision = match self.gateway.chat(&request).await {
            Ok(raw) => {
                let decision = normalize_route(&raw, self.agent_names.as_slice(), self.fallback());
                if decision.fell_back {
                    debug!(
                        "Router answer '{}' is not an agent name, falling back to '{}'",
                        truncate_str(raw.trim(), 60),
                        decision.agent
                    );
                }
                decision
            }
            Err(e) => {
                warn!("Routing error: {}, falling back to '{}'", e, self.fallback());
                RouteDecision::fallback(self.fallback())
            }
        };

        debug!(agent = %decision.agent, "Routed query");
        decision
    }
}
