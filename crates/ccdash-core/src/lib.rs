//! Log ingestion and aggregation for the ccdash dashboard.
//!
//! [`LogReader`] walks a Claude data directory and rebuilds the project,
//! session, conversation and todo projections on every call. Nothing is
//! cached between reads.

mod config_file;
mod error;
pub mod filters;
pub mod normalize;
mod reader;
pub mod stats;
mod statsig;

pub use config_file::ConfigFileStore;
pub use error::DashboardError;
pub use reader::LogReader;
pub use stats::ActivityWindows;
pub use statsig::read_statsig;

/// Result type for ccdash operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
