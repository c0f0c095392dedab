//! Query filters accepted by the list endpoints.
//!
//! Every field is optional and criteria are combined with AND. An empty
//! filter matches everything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ConversationKind, TodoPriority, TodoStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationFilter {
    #[serde(default, rename = "type")]
    pub kind: Option<ConversationKind>,
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the message body.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilter {
    /// Case-insensitive substring of the project name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub min_sessions: Option<usize>,
    #[serde(default)]
    pub max_sessions: Option<usize>,
    #[serde(default)]
    pub has_active_sessions: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoFilter {
    #[serde(default)]
    pub status: Option<TodoStatus>,
    #[serde(default)]
    pub priority: Option<TodoPriority>,
    #[serde(default)]
    pub session_id: Option<String>,
}
