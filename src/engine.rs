//! Fetch coordinator
//!
//! Fans out one task per exchange, joins them in list order and merges the
//! partial maps. List order, not completion order, decides key collisions.

use std::sync::Arc;
use tracing::Level;

use crate::core::{merge, TickerMap};
use crate::exchanges::ExchangeClient;
use crate::infrastructure::config::Config;
use crate::infrastructure::metrics::MetricsCollector;
use crate::log_exchange;
use crate::rest::RestClient;

/// Aggregates tickers from a fixed list of exchange clients
pub struct Aggregator {
    /// Merge order: later clients overwrite earlier ones
    clients: Vec<Arc<ExchangeClient>>,
    rest: RestClient,
    metrics: Arc<MetricsCollector>,
}

impl Aggregator {
    /// Create an aggregator over `clients`, given in merge order
    pub fn new(clients: Vec<ExchangeClient>, rest: RestClient, metrics: Arc<MetricsCollector>) -> Self {
        Self {
            clients: clients.into_iter().map(Arc::new).collect(),
            rest,
            metrics,
        }
    }

    /// The five configured exchanges in their default order
    pub fn from_config(config: &Config, metrics: Arc<MetricsCollector>) -> Self {
        Self::new(
            ExchangeClient::all_from_config(config),
            RestClient::from_config(&config.http),
            metrics,
        )
    }

    /// Get metrics collector reference
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Fetch from every exchange concurrently and merge the results
    ///
    /// Never fails: an exchange that errors, or whose task panics, contributes
    /// nothing.
    pub async fn fetch_all(&self) -> TickerMap {
        let handles: Vec<_> = self
            .clients
            .iter()
            .map(|client| {
                let client = client.clone();
                let rest = self.rest.clone();
                let metrics = self.metrics.clone();
                let exchange = client.exchange();
                let handle =
                    tokio::spawn(async move { client.fetch_tickers(&rest, &metrics).await });
                (exchange, handle)
            })
            .collect();

        let mut partials = Vec::with_capacity(handles.len());
        for (exchange, handle) in handles {
            match handle.await {
                Ok(tickers) => partials.push(tickers),
                Err(e) => {
                    log_exchange!(Level::ERROR, exchange = %exchange, error = %e, "ticker task failed");
                    self.metrics.record_failure(exchange);
                }
            }
        }

        let merged = merge(partials);
        log_exchange!(Level::DEBUG, symbols = merged.len(), "merged tickers");
        merged
    }
}
