use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};

use polyscout::api::router::create_router;
use polyscout::config::{AppConfig, DiscoveryConfig};
use polyscout::AppState;

/// In-process stand-in for the venue's listing and trades endpoints.
#[derive(Default)]
pub struct FakeVenue {
    pub markets: Vec<Value>,
    pub trades: HashMap<String, Vec<Value>>,
    /// Markets whose trade fetch answers 500.
    pub failing: HashSet<String>,
    /// Markets whose trade fetch never answers in time.
    pub stalled: HashSet<String>,
    pub listing_down: bool,
    pub listing_hits: AtomicUsize,
}

#[allow(dead_code)]
impl FakeVenue {
    pub fn with_market(mut self, condition_id: &str, trades: Vec<Value>) -> Self {
        self.markets
            .push(json!({ "conditionId": condition_id, "active": true, "closed": false }));
        self.trades.insert(condition_id.to_string(), trades);
        self
    }

    pub fn with_failing_market(mut self, condition_id: &str) -> Self {
        self.markets
            .push(json!({ "conditionId": condition_id, "active": true, "closed": false }));
        self.failing.insert(condition_id.to_string());
        self
    }

    pub fn with_stalled_market(mut self, condition_id: &str) -> Self {
        self.markets
            .push(json!({ "conditionId": condition_id, "active": true, "closed": false }));
        self.stalled.insert(condition_id.to_string());
        self
    }

    pub fn listing_down(mut self) -> Self {
        self.listing_down = true;
        self
    }
}

async fn list_markets(State(venue): State<Arc<FakeVenue>>) -> Response {
    venue.listing_hits.fetch_add(1, Ordering::SeqCst);
    if venue.listing_down {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(venue.markets.clone()).into_response()
}

async fn market_trades(
    State(venue): State<Arc<FakeVenue>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let market = params.get("market").cloned().unwrap_or_default();

    if venue.failing.contains(&market) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    if venue.stalled.contains(&market) {
        tokio::time::sleep(Duration::from_secs(30)).await;
    }

    let trades = venue.trades.get(&market).cloned().unwrap_or_default();
    Json(trades).into_response()
}

/// Serve the fake venue on an ephemeral port and return its base URL.
pub async fn spawn_venue(venue: Arc<FakeVenue>) -> String {
    let app = Router::new()
        .route("/markets", get(list_markets))
        .route("/trades", get(market_trades))
        .with_state(venue);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake venue");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        gamma_api_url: base_url.into(),
        data_api_url: base_url.into(),
        http_timeout_secs: 5,
        discovery: DiscoveryConfig {
            fetch_timeout: Duration::from_millis(300),
            ..DiscoveryConfig::default()
        },
    }
}

/// Build the app against a config, with a recorder that is not installed
/// globally (only one global recorder may exist per test process).
pub fn build_app(config: AppConfig) -> (Router, AppState) {
    let metrics_handle = PrometheusBuilder::new().build_recorder().handle();
    let state = AppState::new(config, metrics_handle).expect("Failed to build app state");
    (create_router(state.clone()), state)
}

/// A raw venue trade `hours_ago` hours old, keyed by `proxyWallet`.
#[allow(dead_code)]
pub fn venue_trade(wallet: &str, side: &str, size: f64, price: f64, hours_ago: i64) -> Value {
    let ts = Utc::now().timestamp() - hours_ago * 3_600;
    json!({
        "proxyWallet": wallet,
        "side": side,
        "size": size,
        "price": price,
        "timestamp": ts,
    })
}
