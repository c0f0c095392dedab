//! Filtering for the conversation timeline, project list and todo board.

use crate::stats::{is_within, ActivityWindows};
use ccdash_types::{
    Conversation, ConversationFilter, Project, ProjectFilter, Todo, TodoFilter,
};
use chrono::{DateTime, Utc};

fn in_range(at: DateTime<Utc>, since: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> bool {
    since.is_none_or(|since| at >= since) && until.is_none_or(|until| at <= until)
}

/// Conversations across all projects matching `filter`, newest first.
pub fn conversations(projects: &[Project], filter: &ConversationFilter) -> Vec<Conversation> {
    let search = filter.search.as_deref().map(str::to_lowercase);

    let mut matched: Vec<Conversation> = projects
        .iter()
        .filter(|p| filter.project_id.as_ref().is_none_or(|id| &p.id == id))
        .flat_map(|p| &p.sessions)
        .filter(|s| filter.session_id.as_ref().is_none_or(|id| &s.id == id))
        .flat_map(|s| &s.conversations)
        .filter(|c| filter.kind.is_none_or(|kind| c.kind == kind))
        .filter(|c| in_range(c.timestamp, filter.since, filter.until))
        .filter(|c| {
            search
                .as_deref()
                .is_none_or(|needle| c.message.content.to_lowercase().contains(needle))
        })
        .cloned()
        .collect();

    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    matched
}

/// Projects matching `filter`, order preserved.
pub fn projects(
    projects: Vec<Project>,
    filter: &ProjectFilter,
    now: DateTime<Utc>,
    windows: &ActivityWindows,
) -> Vec<Project> {
    let name = filter.name.as_deref().map(str::to_lowercase);

    projects
        .into_iter()
        .filter(|p| {
            name.as_deref()
                .is_none_or(|needle| p.name.to_lowercase().contains(needle))
        })
        .filter(|p| in_range(p.last_activity, filter.since, filter.until))
        .filter(|p| filter.min_sessions.is_none_or(|min| p.total_sessions >= min))
        .filter(|p| filter.max_sessions.is_none_or(|max| p.total_sessions <= max))
        .filter(|p| {
            filter.has_active_sessions.is_none_or(|wanted| {
                let has_active = p
                    .sessions
                    .iter()
                    .any(|s| is_within(s.last_update, now, windows.session_badge));
                has_active == wanted
            })
        })
        .collect()
}

/// Todos across all sessions matching `filter`, in session order.
pub fn todos(projects: &[Project], filter: &TodoFilter) -> Vec<Todo> {
    projects
        .iter()
        .flat_map(|p| &p.sessions)
        .flat_map(|s| &s.todos)
        .filter(|t| filter.session_id.as_ref().is_none_or(|id| &t.session_id == id))
        .filter(|t| filter.status.is_none_or(|status| t.status == status))
        .filter(|t| filter.priority.is_none_or(|priority| t.priority == priority))
        .cloned()
        .collect()
}
