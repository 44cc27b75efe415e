//! Exchange abstraction traits
//!
//! Every ticker endpoint follows the same shape: build headers, GET a fixed path,
//! decode an exchange-specific body, normalize symbols. Implementors supply the
//! exchange-specific parts; [`fetch_from`] runs the shared pipeline.

use reqwest::header::{HeaderMap, HeaderValue};

use crate::core::{accept_symbol, normalize_symbol, TickerMap};
use crate::exchanges::Exchange;
use crate::rest::{timestamp_ms, RestClient, RestError};

/// One decoded ticker before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerEntry {
    /// Exchange-native pair name
    pub symbol: String,
    /// Decimal price string
    pub price: String,
}

impl TickerEntry {
    pub fn new(symbol: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.into(),
        }
    }
}

/// Public ticker endpoint of one exchange
pub trait TickerSource: Send + Sync {
    /// Get exchange identifier
    fn exchange(&self) -> Exchange;

    /// Scheme and host, without trailing path
    fn base_url(&self) -> &str;

    /// Request headers, signed with `timestamp_ms` where the exchange requires it
    fn headers(&self, timestamp_ms: u64) -> Result<HeaderMap, FetchError>;

    /// Decode a response body into raw entries
    fn parse(&self, body: &[u8]) -> Result<Vec<TickerEntry>, FetchError>;

    /// Full request URL
    fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url().trim_end_matches('/'),
            self.exchange().path()
        )
    }
}

/// Fetch, decode and normalize one exchange's tickers
pub async fn fetch_from<S: TickerSource>(
    source: &S,
    rest: &RestClient,
) -> Result<TickerMap, FetchError> {
    let headers = source.headers(timestamp_ms())?;
    let body = rest.get(&source.url(), headers).await?;
    let entries = source.parse(&body)?;
    Ok(normalize_entries(source.exchange(), entries))
}

/// Filter and normalize decoded entries into a partial map
pub fn normalize_entries<I>(exchange: Exchange, entries: I) -> TickerMap
where
    I: IntoIterator<Item = TickerEntry>,
{
    let delimiter = exchange.delimiter();
    entries
        .into_iter()
        .filter(|entry| accept_symbol(&entry.symbol))
        .map(|entry| (normalize_symbol(&entry.symbol, delimiter), entry.price))
        .collect()
}

/// Header value from configured text
pub(crate) fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::Header(e.to_string()))
}

/// Per-exchange fetch errors
///
/// Never reaches the HTTP caller: the coordinator logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Rest(#[from] RestError),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    Header(String),
}

impl FetchError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Rest(RestError::Timeout(_)) => "timeout",
            FetchError::Rest(RestError::Http(_)) => "http_status",
            FetchError::Rest(_) => "transport",
            FetchError::Parse(_) => "parse",
            FetchError::Header(_) => "header",
        }
    }
}
