//! Common test utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use ccdash_server::{config::Config, routes, state::AppState};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Build the API router over a fresh temporary Claude directory.
pub fn create_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let claude_dir = temp_dir.path().join(".claude");
    std::fs::create_dir_all(claude_dir.join("projects")).unwrap();

    (app_for(&temp_dir, claude_dir), temp_dir)
}

/// Build the API router over an arbitrary Claude directory path.
pub fn app_for(temp_dir: &TempDir, claude_dir: PathBuf) -> Router {
    let config = Config {
        port: 0,
        host: "127.0.0.1".to_string(),
        static_dir: temp_dir.path().join("static"),
        claude_dir,
        ..Config::default()
    };

    let state = Arc::new(AppState::new(config));
    Router::new()
        .nest("/api", routes::api_router())
        .with_state(state)
}

pub fn claude_dir(temp: &TempDir) -> PathBuf {
    temp.path().join(".claude")
}

/// Write a session transcript, one JSON value per line.
pub fn write_session(temp: &TempDir, project: &str, session: &str, records: &[Value]) {
    let dir = claude_dir(temp).join("projects").join(project);
    std::fs::create_dir_all(&dir).unwrap();
    let lines: Vec<String> = records.iter().map(Value::to_string).collect();
    std::fs::write(dir.join(format!("{}.jsonl", session)), lines.join("\n")).unwrap();
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

/// Send a request and return the status with the parsed JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    read_json(app, request, uri).await
}

/// Send a raw body with an optional content type.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    read_json(app, request, uri).await
}

async fn read_json(app: &Router, request: Request<Body>, uri: &str) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Response for {} is not JSON: {}", uri, e));
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}
