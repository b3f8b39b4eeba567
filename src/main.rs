use polyscout::api::router::create_router;
use polyscout::config::AppConfig;
use polyscout::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        gamma_api = %config.gamma_api_url,
        data_api = %config.data_api_url,
        market_scan_limit = config.discovery.market_scan_limit,
        max_concurrent_fetches = config.discovery.max_concurrent_fetches,
        "Starting wallet discovery service"
    );

    let metrics_handle = polyscout::metrics::init_metrics()?;
    let state = AppState::new(config, metrics_handle)?;
    let shutdown = state.shutdown.clone();
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown requested, cancelling in-flight discovery runs");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
