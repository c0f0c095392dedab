//! The user-editable instructions file (`CLAUDE.md`).

use serde::{Deserialize, Serialize};

/// Current contents of the config file. A missing file reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFileContents {
    pub content: String,
    pub exists: bool,
    pub path: String,
}
