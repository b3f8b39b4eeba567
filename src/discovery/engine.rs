use std::time::Instant;

use chrono::Utc;
use metrics::{counter, gauge, histogram};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::aggregator::aggregate;
use super::market_lister::MarketLister;
use super::ranker::rank_wallets;
use super::trade_fetcher::TradeFetcher;
use super::DiscoveryError;
use crate::config::DiscoveryConfig;
use crate::models::{AnalysisCriteria, WalletAnalysis};
use crate::polymarket::{DataClient, GammaClient};

/// Result of one discovery run, in response order.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub criteria: AnalysisCriteria,
    pub total_trades_analyzed: usize,
    pub unique_wallets: usize,
    pub qualifying_wallets: usize,
    pub wallets: Vec<WalletAnalysis>,
}

/// List markets, fan out trade fetches, fold by wallet, then filter and rank.
pub struct DiscoveryEngine {
    lister: MarketLister,
    fetcher: TradeFetcher,
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    pub fn new(gamma: GammaClient, data: DataClient, config: DiscoveryConfig) -> Self {
        let lister = MarketLister::new(gamma, config.market_fetch_limit, config.market_cache_ttl);
        let fetcher = TradeFetcher::new(
            data,
            config.trades_per_market,
            config.max_concurrent_fetches,
            config.fetch_timeout,
        );

        Self {
            lister,
            fetcher,
            config,
        }
    }

    /// Run one analysis. Cancelling `cancel` drops every in-flight fetch.
    pub async fn run(
        &self,
        criteria: &AnalysisCriteria,
        cancel: &CancellationToken,
    ) -> Result<DiscoveryReport, DiscoveryError> {
        let started = Instant::now();
        counter!("discovery_runs_total").increment(1);

        let outcome = tokio::select! {
            _ = cancel.cancelled() => Err(DiscoveryError::Cancelled),
            report = self.analyze(criteria) => report,
        };

        histogram!("discovery_run_duration_seconds").record(started.elapsed().as_secs_f64());
        if let Err(e) = &outcome {
            counter!("discovery_run_failures_total").increment(1);
            tracing::warn!(error = %e, "Discovery run did not complete");
        }
        outcome
    }

    async fn analyze(&self, criteria: &AnalysisCriteria) -> Result<DiscoveryReport, DiscoveryError> {
        let markets = self.lister.list_markets().await?;
        let scan = &markets[..markets.len().min(self.config.market_scan_limit)];

        let cutoff = criteria.lookback_cutoff(Utc::now());
        let fetched = self.fetcher.fetch_all(scan, cutoff).await;

        let total_trades_analyzed = fetched.trades.len();
        counter!("trades_analyzed_total").increment(total_trades_analyzed as u64);

        let wallets = aggregate(&fetched.trades, &self.config.heuristics);
        let unique_wallets = wallets.len();

        let ranked = rank_wallets(wallets, criteria, self.config.max_results);
        gauge!("wallets_qualifying").set(ranked.qualifying as f64);

        tracing::info!(
            markets_listed = markets.len(),
            markets_scanned = fetched.markets_scanned,
            markets_failed = fetched.markets_failed,
            trades = total_trades_analyzed,
            unique_wallets,
            qualifying = ranked.qualifying,
            "Discovery run complete"
        );

        Ok(DiscoveryReport {
            criteria: criteria.clone(),
            total_trades_analyzed,
            unique_wallets,
            qualifying_wallets: ranked.qualifying,
            wallets: ranked.wallets,
        })
    }
}
