//! Aggregate statistics.

use serde::{Deserialize, Serialize};

/// Dashboard-wide counts across every project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: usize,
    pub active_projects: usize,
    pub total_sessions: usize,
    pub active_sessions: usize,
    pub total_messages: usize,
    pub total_todos: usize,
    pub completed_todos: usize,
    /// Mean session duration in milliseconds.
    pub average_session_duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoProgress {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
}

/// Summary of one session for the session list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub message_count: usize,
    pub duration: i64,
    pub tools_used: Vec<String>,
    pub todo_progress: TodoProgress,
    pub is_active: bool,
}
