pub mod api;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod polymarket;

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::discovery::DiscoveryEngine;
use crate::polymarket::{DataClient, GammaClient};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DiscoveryEngine>,
    pub metrics_handle: PrometheusHandle,
    /// Cancelled on server shutdown; each request runs under a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Wire the venue clients and discovery engine from config. One HTTP
    /// client (and connection pool) is shared by both venue clients.
    pub fn new(config: AppConfig, metrics_handle: PrometheusHandle) -> anyhow::Result<Self> {
        let http = config.http_client()?;
        let gamma = GammaClient::new(http.clone(), config.gamma_api_url.clone());
        let data = DataClient::new(http, config.data_api_url.clone());
        let engine = DiscoveryEngine::new(gamma, data, config.discovery.clone());

        Ok(Self {
            engine: Arc::new(engine),
            metrics_handle,
            shutdown: CancellationToken::new(),
        })
    }
}
