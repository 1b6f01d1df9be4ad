//! Conversation entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of trailing history messages included in an agent prompt
pub const HISTORY_WINDOW: usize = 10;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role-tagged message as sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One entry of a conversation history.
///
/// The history is an append-only sequence owned by the caller; the agent
/// system only ever reads a trailing window of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_used: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools_used: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            agent_used: None,
            tools_used: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, agent_used: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            agent_used: Some(agent_used.into()),
            tools_used: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_tools_used(mut self, tools: Vec<String>) -> Self {
        self.tools_used = tools;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The part of this entry a model sees
    pub fn to_message(&self) -> Message {
        Message {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// The trailing [`HISTORY_WINDOW`] messages of `history`.
///
/// Older messages are dropped silently; this is a fixed message count, not
/// a token budget.
pub fn history_window(history: &[ConversationMessage]) -> &[ConversationMessage] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> Vec<ConversationMessage> {
        (0..n)
            .map(|i| ConversationMessage::user(format!("message {}", i)))
            .collect()
    }

    #[test]
    fn test_window_keeps_last_ten() {
        let h = history(15);
        let window = history_window(&h);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "message 5");
        assert_eq!(window[9].content, "message 14");
    }

    #[test]
    fn test_window_short_history_unchanged() {
        let h = history(3);
        assert_eq!(history_window(&h).len(), 3);
        assert!(history_window(&[]).is_empty());
    }

    #[test]
    fn test_to_message_drops_metadata() {
        let entry = ConversationMessage::assistant("done", "file_manager")
            .with_tools_used(vec!["write_file".to_string()]);
        assert_eq!(entry.to_message(), Message::assistant("done"));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_conversation_message_serde_skips_empty_fields() {
        let json = serde_json::to_value(ConversationMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        assert!(json.get("agent_used").is_none());
        assert!(json.get("tools_used").is_none());
        assert!(json.get("timestamp").is_some());
    }
}
