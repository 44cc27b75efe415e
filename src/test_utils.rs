//! Test utilities: a local mock upstream standing in for exchange REST APIs
//!
//! Binds an ephemeral port on 127.0.0.1, serves canned bodies and records the
//! headers of every request it sees.

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::infrastructure::config::Config;

/// A request the mock upstream received
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: &'static str,
    pub headers: HeaderMap,
}

type Seen = Arc<Mutex<Vec<SeenRequest>>>;

fn record(seen: &Seen, path: &'static str, headers: HeaderMap) {
    seen.lock().unwrap().push(SeenRequest { path, headers });
}

/// Builder for a mock exchange
pub struct MockUpstream {
    router: Router,
    seen: Seen,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `body` with `status` on `path`
    pub fn route(self, path: &'static str, status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let seen = self.seen.clone();
        let handler = move |headers: HeaderMap| {
            let body = body.clone();
            let seen = seen.clone();
            async move {
                record(&seen, path, headers);
                (status, body)
            }
        };
        Self {
            router: self.router.route(path, get(handler)),
            seen: self.seen,
        }
    }

    /// Shorthand for a 200 JSON body
    pub fn ok(self, path: &'static str, body: impl Into<String>) -> Self {
        self.route(path, StatusCode::OK, body)
    }

    /// Serve `body` on `path` only after `delay`
    pub fn delayed(self, path: &'static str, delay: Duration, body: impl Into<String>) -> Self {
        let body = body.into();
        let seen = self.seen.clone();
        let handler = move |headers: HeaderMap| {
            let body = body.clone();
            let seen = seen.clone();
            async move {
                record(&seen, path, headers);
                tokio::time::sleep(delay).await;
                body
            }
        };
        Self {
            router: self.router.route(path, get(handler)),
            seen: self.seen,
        }
    }

    /// Respond with the value of request header `name`
    pub fn echo_header(self, path: &'static str, name: &'static str) -> Self {
        let seen = self.seen.clone();
        let handler = move |headers: HeaderMap| {
            let seen = seen.clone();
            async move {
                let value = headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                record(&seen, path, headers);
                value
            }
        };
        Self {
            router: self.router.route(path, get(handler)),
            seen: self.seen,
        }
    }

    /// Bind and serve in the background
    pub async fn spawn(self) -> RunningUpstream {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream address");
        let router = self.router;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        RunningUpstream {
            base_url: format!("http://{}", addr),
            seen: self.seen,
        }
    }
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a served mock upstream
pub struct RunningUpstream {
    base_url: String,
    seen: Seen,
}

impl RunningUpstream {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind unused port");
    let addr = listener.local_addr().expect("unused port address");
    drop(listener);
    format!("http://{}", addr)
}

/// Base URL of a server that sends response headers, then stalls mid-body
pub async fn stalled_body_base_url() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stalled upstream");
    let addr = listener.local_addr().expect("stalled upstream address");
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = [0u8; 1024];
                let _ = socket.read(&mut request).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 64\r\n\r\n[{\"symbol\":")
                    .await;
                tokio::time::sleep(Duration::from_secs(10)).await;
            });
        }
    });
    format!("http://{}", addr)
}

/// Default config with every exchange pointed at `base_url`
pub fn config_with_base_url(base_url: &str) -> Config {
    let mut config = Config::default();
    config.http.timeout_ms = 2_000;
    for exchange in [
        &mut config.exchanges.ftx,
        &mut config.exchanges.mexc,
        &mut config.exchanges.kucoin,
        &mut config.exchanges.gateio,
        &mut config.exchanges.binance,
    ] {
        exchange.base_url = Some(base_url.to_string());
    }
    config
}

/// Canned upstream bodies, one per exchange, each with a single BTC entry
pub mod fixtures {
    pub const FTX: &str = r#"{"success":true,"result":[{"name":"BTC/USD","last":50000.5,"type":"spot"}]}"#;
    pub const MEXC: &str = r#"{"code":200,"data":[{"symbol":"BTC_USDT","last":"50001.1"}]}"#;
    pub const KUCOIN: &str = r#"{"code":"200000","data":{"time":1700000000000,"ticker":[{"symbol":"BTC-USDT","last":"50002.2"}]}}"#;
    pub const GATEIO: &str = r#"[{"currency_pair":"BTC_USDT","last":"50003.3"}]"#;
    pub const BINANCE: &str = r#"[{"symbol":"BTCUSDT","price":"50004.40000000"}]"#;
}
