//! Read and write the free-text instructions file (`CLAUDE.md`).
//!
//! Saves are plain overwrites. Two concurrent saves race and the last one wins.

use crate::Result;
use ccdash_types::ConfigFileContents;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ConfigFileStore {
    path: PathBuf,
}

impl ConfigFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents. A missing file is not an error: it reads as empty
    /// with `exists: false`.
    pub fn read(&self) -> Result<ConfigFileContents> {
        let path = self.path.to_string_lossy().to_string();
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(ConfigFileContents {
                content,
                exists: true,
                path,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ConfigFileContents {
                content: String::new(),
                exists: false,
                path,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the file contents, creating the parent directory if needed.
    pub fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;

        info!(target: "ccdash::config_file", "Saved {:?} ({} bytes)", self.path, content.len());
        Ok(())
    }
}
