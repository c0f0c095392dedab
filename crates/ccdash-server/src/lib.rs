//! ccdash server library - HTTP API over Claude Code session logs.
//!
//! Route handlers, configuration and application state live here, separate
//! from main.rs so integration tests can build the router.

pub mod config;
pub mod logging;
pub mod routes;
pub mod state;
