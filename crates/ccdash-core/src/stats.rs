//! Aggregate statistics over the projects returned by [`crate::LogReader`].
//!
//! Everything here is a pure function of its inputs and an explicit `now`.

use ccdash_types::{Project, ProjectStats, Session, SessionStats, TodoProgress, TodoStatus};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;

/// Hours since last activity for a project to count as active.
pub const PROJECT_ACTIVE_WINDOW_HOURS: i64 = 24;
/// Hours since last update for a session to count as active in [`ProjectStats`].
pub const SESSION_STATS_ACTIVE_WINDOW_HOURS: i64 = 24;
/// Minutes since last update for a session to show the "active" badge.
pub const SESSION_BADGE_ACTIVE_WINDOW_MINUTES: i64 = 60;

/// Look-back windows used to decide what counts as active.
///
/// The session windows differ by default (24h for the dashboard totals, 1h
/// for the per-session badge) and are kept separate so each can be tuned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindows {
    pub project: Duration,
    pub session_stats: Duration,
    pub session_badge: Duration,
}

impl Default for ActivityWindows {
    fn default() -> Self {
        Self {
            project: Duration::hours(PROJECT_ACTIVE_WINDOW_HOURS),
            session_stats: Duration::hours(SESSION_STATS_ACTIVE_WINDOW_HOURS),
            session_badge: Duration::minutes(SESSION_BADGE_ACTIVE_WINDOW_MINUTES),
        }
    }
}

/// True when `at` falls strictly inside the window ending at `now`. A window
/// reaching past the earliest representable time covers everything.
pub fn is_within(at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    now.checked_sub_signed(window).is_none_or(|start| at > start)
}

pub fn project_stats(
    projects: &[Project],
    now: DateTime<Utc>,
    windows: &ActivityWindows,
) -> ProjectStats {
    let active_projects = projects
        .iter()
        .filter(|p| is_within(p.last_activity, now, windows.project))
        .count();

    let sessions: Vec<&Session> = projects.iter().flat_map(|p| &p.sessions).collect();
    let active_sessions = sessions
        .iter()
        .filter(|s| is_within(s.last_update, now, windows.session_stats))
        .count();

    let total_messages = projects.iter().map(|p| p.total_messages).sum();

    let (total_todos, completed_todos) = sessions
        .iter()
        .flat_map(|s| &s.todos)
        .fold((0, 0), |(total, completed), todo| {
            (total + 1, completed + usize::from(todo.is_completed()))
        });

    let average_session_duration = if sessions.is_empty() {
        0.0
    } else {
        sessions.iter().map(|s| s.duration as f64).sum::<f64>() / sessions.len() as f64
    };

    ProjectStats {
        total_projects: projects.len(),
        active_projects,
        total_sessions: sessions.len(),
        active_sessions,
        total_messages,
        total_todos,
        completed_todos,
        average_session_duration,
    }
}

/// Per-session summary for the session list.
pub fn session_stats(session: &Session, now: DateTime<Utc>, windows: &ActivityWindows) -> SessionStats {
    let tools_used: BTreeSet<&str> = session
        .conversations
        .iter()
        .flat_map(|c| c.tool_names())
        .collect();

    let mut todo_progress = TodoProgress {
        total: session.todos.len(),
        ..TodoProgress::default()
    };
    for todo in &session.todos {
        match todo.status {
            TodoStatus::Completed => todo_progress.completed += 1,
            TodoStatus::InProgress => todo_progress.in_progress += 1,
            TodoStatus::Pending => todo_progress.pending += 1,
        }
    }

    SessionStats {
        message_count: session.message_count,
        duration: session.duration,
        tools_used: tools_used.into_iter().map(str::to_string).collect(),
        todo_progress,
        is_active: is_within(session.last_update, now, windows.session_badge),
    }
}
