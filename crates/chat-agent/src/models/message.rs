use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The sender value the chat UI uses for messages typed by the user
pub const USER_SENDER: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

/// One line of prior conversation, as the chat UI records it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: String,
    pub text: String,
}

/// Body of a send-message request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageWithContext {
    pub current_message: String,
    pub message_history: Vec<HistoryEntry>,
    /// Handed to the swap service untouched
    #[serde(default)]
    pub permissions: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A message to or from an LLM
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }

    /// Anything not sent by the user is replayed to the model as a system line
    pub fn from_history(entry: &HistoryEntry) -> Self {
        let role = if entry.sender == USER_SENDER {
            Role::User
        } else {
            Role::System
        };
        Self::new(role, entry.text.clone())
    }
}

pub fn format_history(entries: &[HistoryEntry]) -> Vec<Message> {
    entries.iter().map(Message::from_history).collect()
}
