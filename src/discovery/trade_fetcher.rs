use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use metrics::counter;

use crate::models::{MarketSummary, Trade};
use crate::polymarket::data_client::DataClientError;
use crate::polymarket::{sanitize_trade, ApiTrade, DataClient};

/// Trades gathered from one fan-out, already sanitized and lookback-filtered.
#[derive(Debug, Default)]
pub struct FetchedTrades {
    pub trades: Vec<Trade>,
    pub markets_scanned: usize,
    pub markets_failed: usize,
}

/// Fetches recent trades for many markets with bounded concurrency.
pub struct TradeFetcher {
    data: DataClient,
    trades_per_market: u32,
    max_concurrent: usize,
    fetch_timeout: Duration,
}

impl TradeFetcher {
    pub fn new(
        data: DataClient,
        trades_per_market: u32,
        max_concurrent: usize,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            data,
            trades_per_market,
            max_concurrent: max_concurrent.max(1),
            fetch_timeout,
        }
    }

    /// Fetch every market and wait for all of them to settle.
    ///
    /// A market that fails or times out contributes no trades. Each market's
    /// trades are kept as an independent slice until every fetch is done, and
    /// only then flattened.
    pub async fn fetch_all(&self, markets: &[MarketSummary], cutoff: DateTime<Utc>) -> FetchedTrades {
        let results: Vec<(MarketSummary, Result<Vec<ApiTrade>, DataClientError>)> =
            stream::iter(markets.to_vec())
                .map(|market| async move {
                    let outcome = self.fetch_market(&market.condition_id).await;
                    (market, outcome)
                })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;

        let mut fetched = FetchedTrades {
            markets_scanned: markets.len(),
            ..FetchedTrades::default()
        };

        for (market, outcome) in results {
            match outcome {
                Ok(raw) => {
                    let received = raw.len();
                    let kept: Vec<Trade> = raw
                        .iter()
                        .filter_map(|t| sanitize_trade(t, &market.condition_id))
                        .filter(|t| t.within_lookback(cutoff))
                        .collect();

                    tracing::debug!(
                        market = %market.condition_id,
                        received,
                        kept = kept.len(),
                        "Fetched market trades"
                    );
                    fetched.trades.extend(kept);
                }
                Err(e) => {
                    counter!("market_fetch_failures_total").increment(1);
                    tracing::warn!(
                        error = %e,
                        market = %market.condition_id,
                        "Trade fetch failed, market skipped"
                    );
                    fetched.markets_failed += 1;
                }
            }
        }

        fetched
    }

    async fn fetch_market(&self, condition_id: &str) -> Result<Vec<ApiTrade>, DataClientError> {
        tokio::time::timeout(
            self.fetch_timeout,
            self.data.get_market_trades(condition_id, self.trades_per_market),
        )
        .await
        .map_err(|_| DataClientError::Timeout(self.fetch_timeout.as_secs()))?
    }
}
