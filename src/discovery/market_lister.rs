use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::counter;
use tokio::sync::RwLock;

use super::DiscoveryError;
use crate::models::MarketSummary;
use crate::polymarket::GammaClient;

#[derive(Debug, Clone)]
struct CachedListing {
    markets: Arc<Vec<MarketSummary>>,
    fetched_at: Instant,
}

impl CachedListing {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Lists open markets, caching the result for `ttl`.
///
/// A failed refresh falls back to the last listing regardless of age. Only a
/// failure with nothing cached is reported as an error.
pub struct MarketLister {
    gamma: GammaClient,
    fetch_limit: u32,
    ttl: Duration,
    cache: RwLock<Option<CachedListing>>,
}

impl MarketLister {
    pub fn new(gamma: GammaClient, fetch_limit: u32, ttl: Duration) -> Self {
        Self {
            gamma,
            fetch_limit,
            ttl,
            cache: RwLock::new(None),
        }
    }

    pub async fn list_markets(&self) -> Result<Arc<Vec<MarketSummary>>, DiscoveryError> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.is_fresh(self.ttl) {
                counter!("market_list_cache_hits_total").increment(1);
                return Ok(Arc::clone(&cached.markets));
            }
        }

        match self.gamma.get_open_markets(self.fetch_limit).await {
            Ok(raw) => {
                let markets: Vec<MarketSummary> = raw
                    .into_iter()
                    .filter_map(|m| m.into_summary())
                    .take(self.fetch_limit as usize)
                    .collect();
                let markets = Arc::new(markets);

                tracing::info!(markets = markets.len(), "Market listing refreshed");

                *self.cache.write().await = Some(CachedListing {
                    markets: Arc::clone(&markets),
                    fetched_at: Instant::now(),
                });
                Ok(markets)
            }
            Err(e) => match self.cache.read().await.as_ref() {
                Some(stale) => {
                    tracing::warn!(
                        error = %e,
                        age_secs = stale.fetched_at.elapsed().as_secs(),
                        "Market listing failed, serving stale listing"
                    );
                    Ok(Arc::clone(&stale.markets))
                }
                None => {
                    tracing::error!(error = %e, "Market listing failed with no cached listing");
                    Err(e.into())
                }
            },
        }
    }
}
