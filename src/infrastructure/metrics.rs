//! Metrics collection for system monitoring
//!
//! Lock-free counters using atomic operations. Exchange clients record every
//! fetch outcome here, so failures absorbed at the client boundary stay visible.
//! Exported via `/api/stats`.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime};

use crate::exchanges::Exchange;

/// Counters for one exchange
#[derive(Default)]
struct ExchangeCounters {
    successes: AtomicU64,
    failures: AtomicU64,
    last_ticker_count: AtomicU64,
    /// Unix millis of the last successful fetch
    last_success_time: AtomicU64,
}

/// System metrics collector
///
/// Thread-safe counters shared by every request.
pub struct MetricsCollector {
    /// Indexed by position in [`Exchange::ALL`]
    exchanges: [ExchangeCounters; 5],
    /// Aggregate responses served
    requests: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

/// Per-exchange metrics snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeStats {
    pub exchange: &'static str,
    pub successes: u64,
    pub failures: u64,
    pub last_ticker_count: u64,
    pub last_success_time: u64,
}

/// Metrics snapshot for API export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub uptime_seconds: u64,
    pub exchanges: Vec<ExchangeStats>,
}

impl MetricsSnapshot {
    pub fn exchange(&self, exchange: Exchange) -> Option<&ExchangeStats> {
        self.exchanges.iter().find(|s| s.exchange == exchange.name())
    }
}

fn slot(exchange: Exchange) -> usize {
    Exchange::ALL
        .iter()
        .position(|e| *e == exchange)
        .unwrap_or_default()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

impl MetricsCollector {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            exchanges: Default::default(),
            requests: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a successful fetch that produced `count` tickers
    #[inline]
    pub fn record_success(&self, exchange: Exchange, count: usize) {
        let counters = &self.exchanges[slot(exchange)];
        counters.successes.fetch_add(1, Ordering::Relaxed);
        counters.last_ticker_count.store(count as u64, Ordering::Relaxed);
        counters.last_success_time.store(now_millis(), Ordering::Relaxed);
    }

    /// Record a fetch that degraded to an empty contribution
    #[inline]
    pub fn record_failure(&self, exchange: Exchange) {
        let counters = &self.exchanges[slot(exchange)];
        counters.failures.fetch_add(1, Ordering::Relaxed);
        counters.last_ticker_count.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        let exchanges = Exchange::ALL
            .iter()
            .zip(self.exchanges.iter())
            .map(|(exchange, counters)| ExchangeStats {
                exchange: exchange.name(),
                successes: counters.successes.load(Ordering::Relaxed),
                failures: counters.failures.load(Ordering::Relaxed),
                last_ticker_count: counters.last_ticker_count.load(Ordering::Relaxed),
                last_success_time: counters.last_success_time.load(Ordering::Relaxed),
            })
            .collect();

        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            exchanges,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
