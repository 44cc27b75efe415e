//! FTX markets client
//!
//! `GET /api/markets`, signed: `FTX-TS`, `FTX-KEY` and a hex `FTX-SIGN`.
//! Prices arrive as JSON numbers.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::Deserialize;

use crate::core::{price_or, RawPrice};
use crate::exchanges::traits::{header_value, FetchError, TickerEntry, TickerSource};
use crate::exchanges::Exchange;
use crate::infrastructure::config::ExchangeConfig;
use crate::rest::RequestSigner;

#[derive(Debug, Clone)]
pub struct FtxClient {
    base_url: String,
    api_key: String,
    signer: RequestSigner,
}

impl FtxClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            signer: RequestSigner::new(api_secret),
        }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self::new(
            config.base_url_for(Exchange::Ftx),
            config.api_key.clone(),
            config.api_secret.clone(),
        )
    }
}

impl TickerSource for FtxClient {
    fn exchange(&self) -> Exchange {
        Exchange::Ftx
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self, timestamp_ms: u64) -> Result<HeaderMap, FetchError> {
        let signature = self
            .signer
            .sign_hex(timestamp_ms, "GET", Exchange::Ftx.path());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, header_value("application/json")?);
        headers.insert("ftx-key", header_value(&self.api_key)?);
        headers.insert("ftx-sign", header_value(&signature)?);
        headers.insert("ftx-ts", header_value(&timestamp_ms.to_string())?);
        Ok(headers)
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<TickerEntry>, FetchError> {
        let response: MarketsResponse = serde_json::from_slice(body)?;
        Ok(response
            .result
            .into_iter()
            .map(|m| TickerEntry::new(m.name, price_or(m.last, "0")))
            .collect())
    }
}

// === API Response Types ===

#[derive(Debug, Deserialize)]
struct MarketsResponse {
    #[serde(default)]
    result: Vec<Market>,
}

#[derive(Debug, Deserialize)]
struct Market {
    #[serde(default)]
    name: String,
    /// Null for markets that have not traded yet
    last: Option<RawPrice>,
}
