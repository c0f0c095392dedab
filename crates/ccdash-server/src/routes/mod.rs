//! HTTP route handlers.

pub mod claude;
pub mod file;

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

/// Routes served under `/api`.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/claude/file", get(file::read).post(file::save))
        .route("/claude/projects", get(claude::list_projects))
        .route("/claude/stats", get(claude::stats))
        .route("/claude/sessions/{id}", get(claude::get_session))
        .route("/claude/sessions/{id}/stats", get(claude::session_stats))
        .route("/claude/conversations", get(claude::list_conversations))
        .route("/claude/todos", get(claude::list_todos))
        .route("/claude/statsig", get(claude::statsig))
        .route("/health", get(health))
}

/// Envelope for every `/api/claude/*` data response. Failures keep the same
/// shape with `success: false` and an empty `data`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Response {
        Json(Self {
            success: true,
            message: None,
            data,
        })
        .into_response()
    }

    pub fn failure(status: StatusCode, message: impl Into<String>, data: T) -> Response {
        (
            status,
            Json(Self {
                success: false,
                message: Some(message.into()),
                data,
            }),
        )
            .into_response()
    }
}

/// Plain `{error}` body used by the config file endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn response(status: StatusCode, error: impl Into<String>) -> Response {
        (status, Json(Self { error: error.into() })).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
    /// Seconds since startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Milliseconds spent building this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Healthy unless the data directory exists but cannot be inspected.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let started = Instant::now();

    if let Err(e) = std::fs::metadata(state.reader.claude_dir()) {
        if e.kind() != ErrorKind::NotFound {
            error!(target: "ccdash::api", "Health check failed: {}", e);
            let body = HealthResponse {
                status: "unhealthy",
                timestamp: Utc::now(),
                version: None,
                uptime: None,
                environment: None,
                response_time: None,
                error: Some(e.to_string()),
            };
            return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
        }
    }

    let body = HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        version: Some(env!("CARGO_PKG_VERSION")),
        uptime: Some(state.started_at.elapsed().as_secs()),
        environment: Some(state.config.environment.clone()),
        response_time: Some(started.elapsed().as_secs_f64() * 1000.0),
        error: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}
