//! Routing decisions.
//!
//! The router model is asked for a single agent name but returns free text.
//! [`normalize_route`] turns that text into a [`RouteDecision`] that always
//! names a known agent.

use serde::{Deserialize, Serialize};

/// Characters stripped from the router's answer before matching
const STRIPPED_CHARS: [char; 3] = ['"', '\'', '.'];

/// The agent chosen for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    /// Name of the selected agent; always a configured agent
    pub agent: String,
    /// Whether the fallback was used instead of the model's answer
    pub fell_back: bool,
}

impl RouteDecision {
    pub fn selected(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            fell_back: false,
        }
    }

    pub fn fallback(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            fell_back: true,
        }
    }
}

/// Map a raw router answer onto a known agent name.
///
/// The answer is trimmed and lower-cased, quote and period characters are
/// removed, and the remainder must equal one of `known` exactly. Anything
/// else (multi-word answers, unknown names, empty text) yields `fallback`.
pub fn normalize_route<S: AsRef<str>>(raw: &str, known: &[S], fallback: &str) -> RouteDecision {
    let cleaned = clean(raw);
    match known.iter().find(|name| name.as_ref() == cleaned) {
        Some(name) => RouteDecision::selected(name.as_ref()),
        None => RouteDecision::fallback(fallback),
    }
}

/// Whether the router can ever select an agent called `name`.
///
/// Router answers are normalized before matching, so a name with upper-case
/// letters, quotes, periods or surrounding whitespace never matches.
pub fn is_routable_name(name: &str) -> bool {
    !name.is_empty() && clean(name) == name
}

fn clean(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect()
}
