//! ccdash server - JSON API and static UI host for Claude Code session logs.

use anyhow::Result;
use axum::Router;
use ccdash_server::{config, logging, routes, state};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use logging::{LogConfig, LogFormat};

/// ccdash server - local dashboard for Claude Code session logs.
#[derive(Parser, Debug)]
#[command(name = "ccdash-server")]
#[command(about = "HTTP server exposing Claude Code projects, sessions and todos as JSON")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the Claude data directory (default ~/.claude)
    #[arg(long, value_name = "DIR")]
    claude_dir: Option<PathBuf>,

    /// Enable verbose logging (INFO level for most targets)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set the level of one target: startup, api, reader, config_file or
    /// tower_http (e.g. "reader=debug"). Repeatable.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.quiet,
        cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(claude_dir) = cli.claude_dir {
        config.claude_dir = claude_dir;
    }

    tracing::info!(
        target: "ccdash::startup",
        "Loaded configuration (port: {}, claude_dir: {:?})",
        config.port,
        config.claude_dir
    );

    let state = Arc::new(AppState::new(config.clone()));

    let app = Router::new()
        .nest("/api", routes::api_router())
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(target: "ccdash::startup", "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
