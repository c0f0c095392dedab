//! Read and save the editable instructions file.

use crate::routes::ErrorResponse;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub path: String,
    pub message: String,
}

fn file_name(state: &AppState) -> String {
    state
        .config_file
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "config".to_string())
}

/// Current file contents. A missing file is reported with `exists: false`.
pub async fn read(State(state): State<Arc<AppState>>) -> Response {
    let store = state.config_file.clone();

    match tokio::task::spawn_blocking(move || store.read()).await {
        Ok(Ok(contents)) => Json(contents).into_response(),
        Ok(Err(e)) => {
            error!(target: "ccdash::config_file", "Error reading {:?}: {}", state.config_file.path(), e);
            ErrorResponse::response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read {} file", file_name(&state)),
            )
        }
        Err(e) => {
            error!(target: "ccdash::config_file", "Read task failed: {}", e);
            ErrorResponse::response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read {} file", file_name(&state)),
            )
        }
    }
}

/// Overwrite the file with `{"content": "..."}`.
pub async fn save(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(target: "ccdash::config_file", "Rejected save request: {}", rejection.body_text());
            return ErrorResponse::response(rejection.status(), rejection.body_text());
        }
    };

    let Some(content) = body.get("content").and_then(Value::as_str).map(str::to_string) else {
        return ErrorResponse::response(StatusCode::BAD_REQUEST, "Content must be a string");
    };

    let store = state.config_file.clone();
    let name = file_name(&state);

    match tokio::task::spawn_blocking(move || store.write(&content)).await {
        Ok(Ok(())) => Json(SaveResponse {
            success: true,
            path: state.config_file.path().to_string_lossy().to_string(),
            message: format!("{} file saved successfully", name),
        })
        .into_response(),
        Ok(Err(e)) => {
            error!(target: "ccdash::config_file", "Error writing {:?}: {}", state.config_file.path(), e);
            ErrorResponse::response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save {} file", name),
            )
        }
        Err(e) => {
            error!(target: "ccdash::config_file", "Write task failed: {}", e);
            ErrorResponse::response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save {} file", name),
            )
        }
    }
}
