//! KuCoin all-tickers client
//!
//! `GET /api/v1/market/allTickers`. Signed with a base64 `KC-API-SIGN` plus the
//! key, timestamp and passphrase headers.

use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::core::{price_or, RawPrice};
use crate::exchanges::traits::{header_value, FetchError, TickerEntry, TickerSource};
use crate::exchanges::Exchange;
use crate::infrastructure::config::ExchangeConfig;
use crate::rest::RequestSigner;

#[derive(Debug, Clone)]
pub struct KucoinClient {
    base_url: String,
    api_key: String,
    passphrase: String,
    signer: RequestSigner,
}

impl KucoinClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            passphrase: passphrase.into(),
            signer: RequestSigner::new(api_secret),
        }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self::new(
            config.base_url_for(Exchange::Kucoin),
            config.api_key.clone(),
            config.api_secret.clone(),
            config.passphrase.clone(),
        )
    }
}

impl TickerSource for KucoinClient {
    fn exchange(&self) -> Exchange {
        Exchange::Kucoin
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self, timestamp_ms: u64) -> Result<HeaderMap, FetchError> {
        let signature = self
            .signer
            .sign_base64(timestamp_ms, "GET", Exchange::Kucoin.path());

        let mut headers = HeaderMap::new();
        headers.insert("kc-api-sign", header_value(&signature)?);
        headers.insert("kc-api-timestamp", header_value(&timestamp_ms.to_string())?);
        headers.insert("kc-api-key", header_value(&self.api_key)?);
        headers.insert("kc-api-passphrase", header_value(&self.passphrase)?);
        Ok(headers)
    }

    fn parse(&self, body: &[u8]) -> Result<Vec<TickerEntry>, FetchError> {
        let response: AllTickersResponse = serde_json::from_slice(body)?;
        Ok(response
            .data
            .ticker
            .into_iter()
            .map(|t| TickerEntry::new(t.symbol, price_or(t.last, "")))
            .collect())
    }
}

// === API Response Types ===

#[derive(Debug, Deserialize)]
struct AllTickersResponse {
    #[serde(default)]
    data: AllTickersData,
}

#[derive(Debug, Default, Deserialize)]
struct AllTickersData {
    #[serde(default)]
    ticker: Vec<Ticker>,
}

#[derive(Debug, Deserialize)]
struct Ticker {
    #[serde(default)]
    symbol: String,
    last: Option<RawPrice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> KucoinClient {
        KucoinClient::new("https://api.kucoin.com", "kc-key", "kc-secret", "kc-pass")
    }

    #[test]
    fn test_parse_all_tickers() {
        let body = br#"{
            "code": "200000",
            "data": {
                "time": 1700000000000,
                "ticker": [
                    {"symbol": "BTC-USDT", "symbolName": "BTC-USDT", "last": "50002.2"},
                    {"symbol": "KCS-BTC", "last": "0.00021"},
                    {"symbol": "DEAD-USDT", "last": null}
                ]
            }
        }"#;
        let entries = client().parse(body).unwrap();
        assert_eq!(
            entries,
            vec![
                TickerEntry::new("BTC-USDT", "50002.2"),
                TickerEntry::new("KCS-BTC", "0.00021"),
                TickerEntry::new("DEAD-USDT", ""),
            ]
        );
    }

    #[test]
    fn test_parse_missing_data_is_empty() {
        let entries = client().parse(br#"{"code":"400003","msg":"KC-API-KEY not exists"}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_signed_headers() {
        let headers = client().headers(1_700_000_000_000).unwrap();
        let expected = RequestSigner::new("kc-secret").sign_base64(
            1_700_000_000_000,
            "GET",
            "/api/v1/market/allTickers",
        );

        assert_eq!(headers["kc-api-sign"], expected.as_str());
        assert_eq!(headers["kc-api-timestamp"], "1700000000000");
        assert_eq!(headers["kc-api-key"], "kc-key");
        assert_eq!(headers["kc-api-passphrase"], "kc-pass");
    }

    #[test]
    fn test_bad_passphrase_header() {
        let client = KucoinClient::new("", "key", "secret", "line\nbreak");
        assert!(matches!(client.headers(0), Err(FetchError::Header(_))));
    }
}
