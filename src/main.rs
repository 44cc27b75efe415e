//! Spot ticker aggregator
//!
//! # Architecture
//! - **core**: Symbol normalization and ticker maps
//! - **exchanges**: One REST client per exchange
//! - **engine**: Concurrent fan-out and ordered merge
//! - **rest**: HTTP and request signing helpers
//! - **infrastructure**: API server, config, logging, metrics

use std::sync::Arc;

use ticker_aggregator::infrastructure::logging::init_logging;
use ticker_aggregator::infrastructure::metrics::MetricsCollector;
use ticker_aggregator::infrastructure::{start_server, AppState};
use ticker_aggregator::{Aggregator, Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Guards flush file appenders on drop; hold them until exit
    let _guards = init_logging(&config.logging)?;

    tracing::info!(
        port = config.server.port,
        timeout_ms = config.http.timeout_ms,
        "starting ticker aggregator"
    );

    let metrics = Arc::new(MetricsCollector::new());
    let aggregator = Aggregator::from_config(&config, metrics);

    start_server(AppState::new(aggregator), &config.server).await
}
