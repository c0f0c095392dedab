//! Shared application state.

use crate::config::Config;
use ccdash_core::{ActivityWindows, ConfigFileStore, LogReader};
use std::time::Instant;

/// Shared application state. Nothing in here changes after startup.
pub struct AppState {
    pub reader: LogReader,
    pub config_file: ConfigFileStore,
    pub windows: ActivityWindows,
    pub started_at: Instant,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            reader: LogReader::new(config.claude_dir.clone()),
            config_file: ConfigFileStore::new(config.config_file_path()),
            windows: config.activity_windows(),
            started_at: Instant::now(),
            config,
        }
    }
}
