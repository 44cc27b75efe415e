//! Spot ticker aggregator
//!
//! Fetches last prices from five exchanges concurrently, normalizes their pair
//! names into one key space and serves the merged map as JSON.

pub mod core;
pub mod engine;
pub mod exchanges;
pub mod infrastructure;
pub mod rest;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use engine::Aggregator;
pub use infrastructure::config::{Config, ConfigError};

use thiserror::Error;

/// Main error type for the aggregator
#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AggregatorError>;
