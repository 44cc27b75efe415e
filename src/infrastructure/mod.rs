//! Infrastructure
//!
//! Everything around the fetch pipeline:
//! - HTTP API server
//! - Configuration management
//! - Logging and metrics

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;

pub use api::{build_router, start_server, AppState};
