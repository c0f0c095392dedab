//! Projects and sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Conversation, Todo};

/// One session transcript (`<project>/<session>.jsonl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// Directory name of the project containing the transcript.
    pub project_id: String,
    /// First `-` separated segment of the session id. Display only.
    pub id_prefix: String,
    pub conversations: Vec<Conversation>,
    pub todos: Vec<Todo>,
    pub start_time: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub message_count: usize,
    /// Milliseconds between the first and last conversation.
    pub duration: i64,
}

impl Session {
    /// A session with no parsed conversations. Its timestamps are the read
    /// time and carry no information.
    pub fn is_degenerate(&self) -> bool {
        self.conversations.is_empty()
    }
}

/// One project directory under `projects/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Directory name, e.g. `-Users-me-code-app`.
    pub id: String,
    /// Directory name with `-` turned back into `/`.
    pub path: String,
    pub name: String,
    pub sessions: Vec<Session>,
    pub last_activity: DateTime<Utc>,
    pub total_messages: usize,
    pub total_sessions: usize,
}
