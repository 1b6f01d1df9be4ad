//! Prompt templates for the router

/// Templates for the routing call
pub struct RouterPromptTemplate;

impl RouterPromptTemplate {
    /// System prompt enumerating every agent with its description.
    pub fn system<'a, I>(agents: I, fallback: &str) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut prompt = String::from(
            "You are a routing assistant. Your job is to determine which specialized agent should handle a user's request.\n\n",
        );
        prompt.push_str("Available agents:\n");
        for (name, description) in agents {
            prompt.push_str(&format!("- {}: {}\n", name, description));
        }
        prompt.push_str(
            "\nAnalyze the user's request and respond with ONLY the agent name that should handle it.\n",
        );
        prompt.push_str("Respond with just the agent name, nothing else.\n");
        prompt.push_str(&format!(
            "If no specialized agent fits, respond with '{}'.",
            fallback
        ));
        prompt
    }

    /// User turn carrying the query to classify
    pub fn user(query: &str) -> String {
        format!(
            "Which agent should handle this request?\n\nRequest: {}",
            query
        )
    }
}
