//! MEXC spot ticker client
//!
//! `GET /open/api/v2/market/ticker`, public. Pairs look like `BTC_USDT`.

use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::core::{price_or, RawPrice};
use crate::exchanges::traits::{FetchError, TickerEntry, TickerSource};
use crate::exchanges::Exchange;
use crate::infrastructure::config::ExchangeConfig;

#[derive(Debug, Clone)]
pub struct MexcClient {
    base_url: String,
}

impl MexcClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self::new(config.base_url_for(Exchange::Mexc))
    }
}

impl TickerSource for MexcClient {
    fn exchange(&self) -> Exchange {
        Exchange::Mexc
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self, _timestamp_ms: u64) -> Result<HeaderMap, FetchError> {
        Ok(HeaderMap::new())
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<TickerEntry>, FetchError> {
        let response: TickerResponse = serde_json::from_slice(body)?;
        Ok(response
            .data
            .into_iter()
            .map(|t| TickerEntry::new(t.symbol, price_or(t.last, "")))
            .collect())
    }
}

// === API Response Types ===

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    data: Vec<Ticker>,
}

#[derive(Debug, Deserialize)]
struct Ticker {
    #[serde(default)]
    symbol: String,
    last: Option<RawPrice>,
}
