//! API Server
//!
//! Serves the aggregate ticker map. The root route answers any method, and any
//! unmatched path or method falls back to it. `GET /api/stats` exposes fetch
//! metrics.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::Level;

use crate::engine::Aggregator;
use crate::infrastructure::config::ServerConfig;
use crate::infrastructure::metrics::{MetricsCollector, MetricsSnapshot};
use crate::{log_api, AggregatorError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        let metrics = aggregator.metrics();
        Self {
            aggregator: Arc::new(aggregator),
            metrics,
        }
    }
}

/// Routes for the aggregate endpoint and stats
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(get_prices))
        .route("/api/stats", get(get_stats).fallback(get_prices))
        .fallback(get_prices)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server
pub async fn start_server(state: AppState, config: &ServerConfig) -> Result<(), AggregatorError> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log_api!(Level::INFO, %addr, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AggregatorError::Server(e.to_string()))?;

    Ok(())
}

/// Handler for every price request
/// Fetches all exchanges and returns the merged map
async fn get_prices(State(state): State<AppState>) -> Response {
    let tickers = state.aggregator.fetch_all().await;
    state.metrics.record_request();
    log_api!(Level::INFO, symbols = tickers.len(), "served aggregate tickers");
    json_or_not_found(&tickers)
}

/// Handler for /api/stats
async fn get_stats(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// Serialize `value` as an `application/json` body, or 404 if that fails
fn json_or_not_found<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            log_api!(Level::ERROR, error = %e, "failed to serialize response");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
