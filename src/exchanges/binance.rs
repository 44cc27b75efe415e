//! Binance spot price client
//!
//! `GET /api/v3/ticker/price`. Public data, but the request still carries
//! `X-MBX-APIKEY`.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

use crate::core::{price_or, RawPrice};
use crate::exchanges::traits::{header_value, FetchError, TickerEntry, TickerSource};
use crate::exchanges::Exchange;
use crate::infrastructure::config::ExchangeConfig;

#[derive(Debug, Clone)]
pub struct BinanceClient {
    base_url: String,
    api_key: String,
}

impl BinanceClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self::new(config.base_url_for(Exchange::Binance), config.api_key.clone())
    }
}

impl TickerSource for BinanceClient {
    fn exchange(&self) -> Exchange {
        Exchange::Binance
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self, _timestamp_ms: u64) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-mbx-apikey", header_value(&self.api_key)?);
        Ok(headers)
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<TickerEntry>, FetchError> {
        let prices: Vec<PriceTicker> = serde_json::from_slice(body)?;
        Ok(prices
            .into_iter()
            .map(|t| TickerEntry::new(t.symbol, price_or(t.price, "")))
            .collect())
    }
}

// === API Response Types ===

#[derive(Debug, Deserialize)]
struct PriceTicker {
    #[serde(default)]
    symbol: String,
    price: Option<RawPrice>,
}
