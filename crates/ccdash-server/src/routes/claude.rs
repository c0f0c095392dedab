//! Session log routes: projects, stats, sessions, conversations, todos.
//!
//! Every handler re-reads the data directory on the blocking pool. A read
//! task that fails to complete is reported as a 500 in the usual envelope.

use crate::routes::ApiResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use ccdash_core::{filters, stats};
use ccdash_types::{
    Conversation, ConversationFilter, Project, ProjectFilter, Session, SessionStats, Todo,
    TodoFilter,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};

/// List projects, optionally filtered.
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProjectFilter>,
) -> Response {
    let reader = state.reader.clone();
    let windows = state.windows;

    let result = tokio::task::spawn_blocking(move || {
        let now = Utc::now();
        filters::projects(reader.read_projects_at(now), &filter, now, &windows)
    })
    .await;

    match result {
        Ok(projects) => {
            debug!(target: "ccdash::api", "Serving {} projects", projects.len());
            ApiResponse::ok(projects)
        }
        Err(e) => {
            error!(target: "ccdash::api", "Error fetching projects: {}", e);
            ApiResponse::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch projects",
                Vec::<Project>::new(),
            )
        }
    }
}

/// Dashboard-wide statistics.
pub async fn stats(State(state): State<Arc<AppState>>) -> Response {
    let reader = state.reader.clone();
    let windows = state.windows;

    match tokio::task::spawn_blocking(move || reader.get_project_stats(&windows)).await {
        Ok(stats) => ApiResponse::ok(Some(stats)),
        Err(e) => {
            error!(target: "ccdash::api", "Error fetching stats: {}", e);
            ApiResponse::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch stats",
                None::<ccdash_types::ProjectStats>,
            )
        }
    }
}

async fn find_session(state: &AppState, id: String) -> Result<Option<Session>, Response> {
    let reader = state.reader.clone();

    tokio::task::spawn_blocking(move || reader.find_session(&id))
        .await
        .map_err(|e| {
            error!(target: "ccdash::api", "Error fetching session: {}", e);
            ApiResponse::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch session",
                None::<Session>,
            )
        })
}

fn session_not_found<T: serde::Serialize>(id: &str) -> Response {
    ApiResponse::failure(
        StatusCode::NOT_FOUND,
        format!("Session not found: {}", id),
        None::<T>,
    )
}

/// One session with its conversations and todos.
pub async fn get_session(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match find_session(&state, id.clone()).await {
        Ok(Some(session)) => ApiResponse::ok(Some(session)),
        Ok(None) => session_not_found::<Session>(&id),
        Err(response) => response,
    }
}

/// Summary numbers for one session.
pub async fn session_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match find_session(&state, id.clone()).await {
        Ok(Some(session)) => {
            ApiResponse::ok(Some(stats::session_stats(&session, Utc::now(), &state.windows)))
        }
        Ok(None) => session_not_found::<SessionStats>(&id),
        Err(response) => response,
    }
}

/// Conversations across all sessions, newest first.
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ConversationFilter>,
) -> Response {
    let reader = state.reader.clone();

    let result = tokio::task::spawn_blocking(move || {
        filters::conversations(&reader.read_projects(), &filter)
    })
    .await;

    match result {
        Ok(conversations) => ApiResponse::ok(conversations),
        Err(e) => {
            error!(target: "ccdash::api", "Error fetching conversations: {}", e);
            ApiResponse::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch conversations",
                Vec::<Conversation>::new(),
            )
        }
    }
}

/// Todos across all sessions.
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<TodoFilter>,
) -> Response {
    let reader = state.reader.clone();

    match tokio::task::spawn_blocking(move || filters::todos(&reader.read_projects(), &filter)).await
    {
        Ok(todos) => ApiResponse::ok(todos),
        Err(e) => {
            error!(target: "ccdash::api", "Error fetching todos: {}", e);
            ApiResponse::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch todos",
                Vec::<Todo>::new(),
            )
        }
    }
}

/// Cached feature flag data, `null` when absent.
pub async fn statsig(State(state): State<Arc<AppState>>) -> Response {
    let reader = state.reader.clone();

    match tokio::task::spawn_blocking(move || reader.read_statsig()).await {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => {
            error!(target: "ccdash::api", "Error fetching statsig data: {}", e);
            ApiResponse::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch statsig data",
                None::<ccdash_types::StatsigData>,
            )
        }
    }
}
