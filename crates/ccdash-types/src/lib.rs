//! Shared types for the ccdash session log dashboard.
//!
//! Everything here is a read-only projection of the files under the Claude
//! data directory. Field names serialize in camelCase, the shape the browser UI
//! reads.

mod config_file;
mod conversation;
mod filter;
mod project;
mod stats;
mod statsig;
mod todo;

pub use config_file::*;
pub use conversation::*;
pub use filter::*;
pub use project::*;
pub use stats::*;
pub use statsig::*;
pub use todo::*;
