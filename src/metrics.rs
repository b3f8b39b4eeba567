use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("discovery_runs_total").absolute(0);
    counter!("discovery_run_failures_total").absolute(0);
    counter!("market_fetch_failures_total").absolute(0);
    counter!("market_list_cache_hits_total").absolute(0);
    counter!("trades_analyzed_total").absolute(0);

    gauge!("wallets_qualifying").set(0.0);

    // Histogram is lazily created on first record; force creation.
    histogram!("discovery_run_duration_seconds").record(0.0);

    Ok(handle)
}
