//! Server configuration.

use anyhow::Result;
use ccdash_core::stats::{
    ActivityWindows, PROJECT_ACTIVE_WINDOW_HOURS, SESSION_BADGE_ACTIVE_WINDOW_MINUTES,
    SESSION_STATS_ACTIVE_WINDOW_HOURS,
};
use chrono::Duration;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Root of the CLI's data directory (`projects/`, `todos/`, `statsig/`).
    #[serde(default = "default_claude_dir")]
    pub claude_dir: PathBuf,
    /// Editable instructions file. Defaults to `<claude_dir>/CLAUDE.md`.
    #[serde(default)]
    pub config_file: Option<PathBuf>,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_project_window")]
    pub project_active_window_hours: u32,
    #[serde(default = "default_session_stats_window")]
    pub session_stats_active_window_hours: u32,
    #[serde(default = "default_session_badge_window")]
    pub session_badge_active_window_minutes: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./frontend/dist")
}

fn default_claude_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".claude")
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_project_window() -> u32 {
    PROJECT_ACTIVE_WINDOW_HOURS as u32
}

fn default_session_stats_window() -> u32 {
    SESSION_STATS_ACTIVE_WINDOW_HOURS as u32
}

fn default_session_badge_window() -> u32 {
    SESSION_BADGE_ACTIVE_WINDOW_MINUTES as u32
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            claude_dir: default_claude_dir(),
            config_file: None,
            environment: default_environment(),
            project_active_window_hours: default_project_window(),
            session_stats_active_window_hours: default_session_stats_window(),
            session_badge_active_window_minutes: default_session_badge_window(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default location (config/default.toml) or fall back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from("config/default.toml");
        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        Ok(Config::default())
    }

    /// Path of the editable instructions file.
    pub fn config_file_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| self.claude_dir.join("CLAUDE.md"))
    }

    pub fn activity_windows(&self) -> ActivityWindows {
        ActivityWindows {
            project: Duration::hours(i64::from(self.project_active_window_hours)),
            session_stats: Duration::hours(i64::from(self.session_stats_active_window_hours)),
            session_badge: Duration::minutes(i64::from(self.session_badge_active_window_minutes)),
        }
    }
}
