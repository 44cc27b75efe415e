//! Configuration management
//!
//! Loads configuration from config.toml at startup, then lets environment
//! variables override exchange credentials. The result is immutable and handed
//! to constructors explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::exchanges::Exchange;

/// Aggregator configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Inbound HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound exchange requests
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-exchange endpoints and credentials
    #[serde(default)]
    pub exchanges: ExchangesConfig,
}

/// Inbound HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// TCP port the aggregate endpoint listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Outbound request configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Per-call timeout for every exchange request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write rolling log files in addition to the console
    #[serde(default)]
    pub file_logging: bool,

    /// Root directory for rolling log files
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

/// Endpoints and credentials for all five exchanges
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExchangesConfig {
    #[serde(default)]
    pub ftx: ExchangeConfig,
    #[serde(default)]
    pub mexc: ExchangeConfig,
    #[serde(default)]
    pub kucoin: ExchangeConfig,
    #[serde(default)]
    pub gateio: ExchangeConfig,
    #[serde(default)]
    pub binance: ExchangeConfig,
}

/// One exchange's endpoint and credentials
///
/// Unsigned exchanges ignore the secret and passphrase.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ExchangeConfig {
    /// Overrides the public endpoint host, e.g. for a local mock
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub passphrase: String,
}

impl ExchangeConfig {
    /// Configured base URL, or the exchange's public one
    pub fn base_url_for(&self, exchange: Exchange) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| exchange.default_base_url().to_string())
    }
}

impl std::fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_logging: false,
            dir: default_log_dir(),
        }
    }
}

fn default_port() -> u16 {
    8090
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_user_agent() -> String {
    "ticker-aggregator/0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Config {
    /// Load configuration from the file named by CONFIG_PATH (default config.toml)
    ///
    /// If the file doesn't exist, returns default configuration. Credentials
    /// from the environment are applied on top either way.
    /// # Errors
    /// Returns error if file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        let mut config = Self::load_from(Path::new(&config_path))?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load a TOML file without consulting the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Override credentials with any of the recognised variables `lookup` returns
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides: [(&str, &mut String); 6] = [
            ("FTX_API_KEY", &mut self.exchanges.ftx.api_key),
            ("FTX_API_SECRET", &mut self.exchanges.ftx.api_secret),
            ("KUCOIN_API_KEY", &mut self.exchanges.kucoin.api_key),
            ("KUCOIN_API_SECRET", &mut self.exchanges.kucoin.api_secret),
            ("KUCOIN_API_PASSPHRASE", &mut self.exchanges.kucoin.passphrase),
            ("BINANCE_API_KEY", &mut self.exchanges.binance.api_key),
        ];

        for (name, slot) in overrides {
            if let Some(value) = lookup(name) {
                *slot = value;
            }
        }
    }

    /// Settings for one exchange
    pub fn exchange(&self, exchange: Exchange) -> &ExchangeConfig {
        match exchange {
            Exchange::Ftx => &self.exchanges.ftx,
            Exchange::Mexc => &self.exchanges.mexc,
            Exchange::Kucoin => &self.exchanges.kucoin,
            Exchange::Gateio => &self.exchanges.gateio,
            Exchange::Binance => &self.exchanges.binance,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.http.timeout_ms, 5_000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.file_logging);
        assert!(config.exchanges.ftx.api_key.is_empty());
    }

    #[test]
    fn test_default_base_urls() {
        let config = Config::default();
        assert_eq!(
            config.exchange(Exchange::Ftx).base_url_for(Exchange::Ftx),
            "https://ftx.com"
        );
        assert_eq!(
            config.exchange(Exchange::Binance).base_url_for(Exchange::Binance),
            "https://api.binance.com"
        );
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9000

            [exchanges.kucoin]
            base_url = "http://127.0.0.1:1234"
            api_key = "kc-key"
            passphrase = "kc-pass"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.http.timeout_ms, 5_000);
        let kucoin = config.exchange(Exchange::Kucoin);
        assert_eq!(kucoin.base_url_for(Exchange::Kucoin), "http://127.0.0.1:1234");
        assert_eq!(kucoin.api_key, "kc-key");
        assert_eq!(kucoin.passphrase, "kc-pass");
        assert!(kucoin.api_secret.is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[server]\nport = \"not a port\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/ticker-aggregator.toml")).unwrap();
        assert_eq!(config.server.port, 8090);
    }

    #[test]
    fn test_env_overrides_credentials() {
        let env: HashMap<&str, &str> = [
            ("FTX_API_KEY", "ftx-key"),
            ("FTX_API_SECRET", "ftx-secret"),
            ("KUCOIN_API_PASSPHRASE", "phrase"),
            ("BINANCE_API_KEY", "bn-key"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::from_toml("[exchanges.kucoin]\napi_key = \"from-file\"").unwrap();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.exchanges.ftx.api_key, "ftx-key");
        assert_eq!(config.exchanges.ftx.api_secret, "ftx-secret");
        assert_eq!(config.exchanges.kucoin.api_key, "from-file");
        assert_eq!(config.exchanges.kucoin.passphrase, "phrase");
        assert_eq!(config.exchanges.binance.api_key, "bn-key");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = Config::default();
        config.exchanges.ftx.api_secret = "top-secret".to_string();
        assert!(!format!("{:?}", config).contains("top-secret"));
    }
}
