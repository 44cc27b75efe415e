//! Exchange-specific ticker clients

pub mod binance;
pub mod ftx;
pub mod gateio;
pub mod kucoin;
pub mod mexc;
pub mod traits;

pub use binance::BinanceClient;
pub use ftx::FtxClient;
pub use gateio::GateioClient;
pub use kucoin::KucoinClient;
pub use mexc::MexcClient;
pub use traits::{fetch_from, FetchError, TickerEntry, TickerSource};

use crate::core::TickerMap;
use crate::infrastructure::config::Config;
use crate::infrastructure::metrics::MetricsCollector;
use crate::log_exchange;
use crate::rest::RestClient;
use tracing::Level;

/// Exchange identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Exchange {
    Ftx,
    Mexc,
    Kucoin,
    Gateio,
    Binance,
}

impl Exchange {
    /// All exchanges in merge order; later entries win key collisions
    pub const ALL: [Exchange; 5] = [
        Exchange::Ftx,
        Exchange::Mexc,
        Exchange::Kucoin,
        Exchange::Gateio,
        Exchange::Binance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Exchange::Ftx => "ftx",
            Exchange::Mexc => "mexc",
            Exchange::Kucoin => "kucoin",
            Exchange::Gateio => "gateio",
            Exchange::Binance => "binance",
        }
    }

    /// Public REST host
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Exchange::Ftx => "https://ftx.com",
            Exchange::Mexc => "https://www.mexc.com",
            Exchange::Kucoin => "https://api.kucoin.com",
            Exchange::Gateio => "https://api.gateio.ws",
            Exchange::Binance => "https://api.binance.com",
        }
    }

    /// Ticker endpoint path
    pub fn path(&self) -> &'static str {
        match self {
            Exchange::Ftx => "/api/markets",
            Exchange::Mexc => "/open/api/v2/market/ticker",
            Exchange::Kucoin => "/api/v1/market/allTickers",
            Exchange::Gateio => "/api/v4/spot/tickers",
            Exchange::Binance => "/api/v3/ticker/price",
        }
    }

    /// Separator between base and quote in native pair names
    pub fn delimiter(&self) -> char {
        match self {
            Exchange::Ftx => '/',
            Exchange::Kucoin => '-',
            Exchange::Mexc | Exchange::Gateio | Exchange::Binance => '_',
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Any of the supported ticker clients
#[derive(Debug, Clone)]
pub enum ExchangeClient {
    Ftx(FtxClient),
    Mexc(MexcClient),
    Kucoin(KucoinClient),
    Gateio(GateioClient),
    Binance(BinanceClient),
}

impl ExchangeClient {
    /// Client for `exchange` built from its config section
    pub fn from_config(exchange: Exchange, config: &Config) -> Self {
        let section = config.exchange(exchange);
        match exchange {
            Exchange::Ftx => ExchangeClient::Ftx(FtxClient::from_config(section)),
            Exchange::Mexc => ExchangeClient::Mexc(MexcClient::from_config(section)),
            Exchange::Kucoin => ExchangeClient::Kucoin(KucoinClient::from_config(section)),
            Exchange::Gateio => ExchangeClient::Gateio(GateioClient::from_config(section)),
            Exchange::Binance => ExchangeClient::Binance(BinanceClient::from_config(section)),
        }
    }

    /// All five clients in merge order
    pub fn all_from_config(config: &Config) -> Vec<Self> {
        Exchange::ALL
            .iter()
            .map(|exchange| Self::from_config(*exchange, config))
            .collect()
    }

    pub fn exchange(&self) -> Exchange {
        match self {
            ExchangeClient::Ftx(c) => c.exchange(),
            ExchangeClient::Mexc(c) => c.exchange(),
            ExchangeClient::Kucoin(c) => c.exchange(),
            ExchangeClient::Gateio(c) => c.exchange(),
            ExchangeClient::Binance(c) => c.exchange(),
        }
    }

    /// Fetch this exchange's normalized tickers, surfacing any failure
    pub async fn fetch(&self, rest: &RestClient) -> Result<TickerMap, FetchError> {
        match self {
            ExchangeClient::Ftx(c) => fetch_from(c, rest).await,
            ExchangeClient::Mexc(c) => fetch_from(c, rest).await,
            ExchangeClient::Kucoin(c) => fetch_from(c, rest).await,
            ExchangeClient::Gateio(c) => fetch_from(c, rest).await,
            ExchangeClient::Binance(c) => fetch_from(c, rest).await,
        }
    }

    /// Fetch tickers, degrading any failure to an empty map
    ///
    /// Failures are logged and counted, never returned.
    pub async fn fetch_tickers(&self, rest: &RestClient, metrics: &MetricsCollector) -> TickerMap {
        let exchange = self.exchange();
        match self.fetch(rest).await {
            Ok(tickers) => {
                log_exchange!(Level::DEBUG, exchange = %exchange, count = tickers.len(), "fetched tickers");
                metrics.record_success(exchange, tickers.len());
                tickers
            }
            Err(e) => {
                log_exchange!(Level::WARN, exchange = %exchange, kind = e.kind(), error = %e, "ticker fetch failed");
                metrics.record_failure(exchange);
                TickerMap::new()
            }
        }
    }
}
