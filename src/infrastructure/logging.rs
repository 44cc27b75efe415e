//! Logging setup
//!
//! Always logs to the console. With `file_logging` enabled, also writes daily
//! rolling files under the configured directory, separated by log type:
//! - main/ - every event, JSON
//! - error/ - WARN and ERROR only
//! - exchange/ - exchange client events
//! - api/ - HTTP server events

use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::infrastructure::config::LoggingConfig;

const LOG_TYPES: [&str; 4] = ["main", "error", "exchange", "api"];

/// Initialize logging
///
/// RUST_LOG takes precedence over `config.level`. Returns the appender guards,
/// which must be kept alive for the duration of the program.
pub fn init_logging(config: &LoggingConfig) -> std::io::Result<Vec<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    if !config.file_logging {
        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .init();
        return Ok(Vec::new());
    }

    for log_type in LOG_TYPES {
        fs::create_dir_all(config.dir.join(log_type))?;
    }

    let mut guards = Vec::new();

    let (main_appender, main_guard) = create_appender(&config.dir, "main");
    guards.push(main_guard);

    let (error_appender, error_guard) = create_appender(&config.dir, "error");
    guards.push(error_guard);

    let (exchange_appender, exchange_guard) = create_appender(&config.dir, "exchange");
    guards.push(exchange_guard);

    let (api_appender, api_guard) = create_appender(&config.dir, "api");
    guards.push(api_guard);

    let main_layer = tracing_subscriber::fmt::layer()
        .with_writer(main_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json();

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(tracing_subscriber::filter::LevelFilter::WARN);

    let exchange_layer = tracing_subscriber::fmt::layer()
        .with_writer(exchange_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            is_exchange_target(metadata.target())
        }));

    let api_layer = tracing_subscriber::fmt::layer()
        .with_writer(api_appender)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            is_api_target(metadata.target())
        }));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(main_layer)
        .with(error_layer)
        .with(exchange_layer)
        .with(api_layer)
        .with(console_layer)
        .init();

    tracing::info!(dir = %config.dir.display(), "file logging enabled");

    Ok(guards)
}

fn is_exchange_target(target: &str) -> bool {
    target.contains("exchange") || target.contains("engine")
}

fn is_api_target(target: &str) -> bool {
    target.contains("api") || target.contains("server")
}

/// Create a daily rolling file appender under `root/name`
fn create_appender(root: &Path, name: &str) -> (NonBlocking, WorkerGuard) {
    let appender = RollingFileAppender::new(Rotation::DAILY, root.join(name), name);
    tracing_appender::non_blocking(appender)
}

/// Log macro helpers for specific log types
#[macro_export]
macro_rules! log_api {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "api", $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_exchange {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "exchange", $level, $($arg)+)
    };
}
