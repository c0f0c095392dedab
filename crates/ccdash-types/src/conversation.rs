//! Conversation records parsed from session transcripts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who produced a conversation entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    #[default]
    User,
    Assistant,
    System,
}

impl ConversationKind {
    /// Parse a role or record type string. Returns `None` for anything outside
    /// the three known kinds.
    pub fn from_known(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// Normalized message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: ConversationKind,
    /// Flattened text of the message.
    pub content: String,
}

/// One tool invocation attached to a conversation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUsage {
    pub name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub result: Value,
    pub timestamp: DateTime<Utc>,
}

/// A single message record within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    /// True when the source record had no id and one was generated for this read.
    /// Such ids change every time the file is read.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub id_synthesized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_uuid: Option<String>,
    pub session_id: String,
    #[serde(rename = "type")]
    pub kind: ConversationKind,
    pub message: Message,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolUsage>>,
}

impl Conversation {
    /// Names of the tools used by this entry, in order of appearance.
    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools
            .iter()
            .flatten()
            .map(|tool| tool.name.as_str())
    }
}
