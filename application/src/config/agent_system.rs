//! Agent system configuration.
//!
//! [`AgentSystemConfig`] is the structure the [`AgentManager`] is built from:
//! every agent definition keyed by name, plus the router definition.
//!
//! [`AgentManager`]: crate::use_cases::agent_manager::AgentManager

use std::collections::BTreeMap;
use switchboard_domain::agent::definition::{
    AgentDefinition, DEFAULT_AGENT_MODEL, RouterDefinition,
};

/// Agents and router, as loaded from configuration.
///
/// Agents are kept in a `BTreeMap` so listing and prompt order is stable.
#[derive(Debug, Clone)]
pub struct AgentSystemConfig {
    pub agents: BTreeMap<String, AgentDefinition>,
    pub router: RouterDefinition,
}

impl AgentSystemConfig {
    pub fn new(router: RouterDefinition) -> Self {
        Self {
            agents: BTreeMap::new(),
            router,
        }
    }

    /// Add an agent, replacing any previous definition with the same name.
    pub fn with_agent(mut self, agent: AgentDefinition) -> Self {
        self.agents.insert(agent.name().to_string(), agent);
        self
    }

    pub fn agent_names(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(|k| k.as_str())
    }
}

impl Default for AgentSystemConfig {
    /// The six built-in agents.
    fn default() -> Self {
        let agent = |name: &str| AgentDefinition::new(name, DEFAULT_AGENT_MODEL);

        Self::new(RouterDefinition::default())
            .with_agent(
                agent("general")
                    .with_description("General conversation and questions")
                    .with_temperature(0.7),
            )
            .with_agent(
                agent("file_manager")
                    .with_description("File operations, saving documents, managing files")
                    .with_temperature(0.3)
                    .with_tools([
                        "read_file",
                        "write_file",
                        "list_directory",
                        "create_directory",
                    ]),
            )
            .with_agent(
                agent("calendar")
                    .with_description("Calendar management, scheduling, events")
                    .with_temperature(0.3)
                    .with_tools(["create_event", "list_events", "delete_event"]),
            )
            .with_agent(
                agent("web_search")
                    .with_description("Internet search, current information, web queries")
                    .with_temperature(0.5)
                    .with_tools(["web_search", "fetch_url"]),
            )
            .with_agent(
                agent("document_analyst")
                    .with_description("Document reading, analysis, summarization")
                    .with_temperature(0.4)
                    .with_tools(["read_file", "analyze_document", "extract_text"]),
            )
            .with_agent(
                agent("code_helper")
                    .with_description("Code writing, debugging, technical questions")
                    .with_temperature(0.6)
                    .with_tools(["read_file", "write_file", "execute_code"]),
            )
    }
}
