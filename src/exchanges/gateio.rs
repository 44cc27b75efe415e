//! Gate.io spot tickers client
//!
//! `GET /api/v4/spot/tickers`, public. The body is a bare array keyed by
//! `currency_pair`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

use crate::core::{price_or, RawPrice};
use crate::exchanges::traits::{FetchError, TickerEntry, TickerSource};
use crate::exchanges::Exchange;
use crate::infrastructure::config::ExchangeConfig;

#[derive(Debug, Clone)]
pub struct GateioClient {
    base_url: String,
}

impl GateioClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self::new(config.base_url_for(Exchange::Gateio))
    }
}

impl TickerSource for GateioClient {
    fn exchange(&self) -> Exchange {
        Exchange::Gateio
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self, _timestamp_ms: u64) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<TickerEntry>, FetchError> {
        let tickers: Vec<Ticker> = serde_json::from_slice(body)?;
        Ok(tickers
            .into_iter()
            .map(|t| TickerEntry::new(t.currency_pair, price_or(t.last, "")))
            .collect())
    }
}

// === API Response Types ===

#[derive(Debug, Deserialize)]
struct Ticker {
    #[serde(default)]
    currency_pair: String,
    last: Option<RawPrice>,
}
