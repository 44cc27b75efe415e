//! Outbound HTTP helper
//!
//! Each call builds its own `reqwest::Client`; nothing is pooled across calls.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use std::time::Duration;

use crate::infrastructure::config::HttpConfig;

/// Thin GET helper carrying the per-call timeout and user agent
#[derive(Debug, Clone)]
pub struct RestClient {
    timeout: Duration,
    user_agent: String,
}

impl RestClient {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self::new(Duration::from_millis(config.timeout_ms), config.user_agent.clone())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue a bodyless GET and return the raw response body
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<Bytes, RestError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| RestError::Build(e.to_string()))?;

        let response = client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RestError::Timeout(self.timeout)
                } else {
                    RestError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(RestError::Http(response.status().as_u16()));
        }

        response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                RestError::Timeout(self.timeout)
            } else {
                RestError::Read(e.to_string())
            }
        })
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

/// Outbound request errors
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    #[error("Client build error: {0}")]
    Build(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Body read error: {0}")]
    Read(String),
}
