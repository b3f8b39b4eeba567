pub mod aggregator;
pub mod engine;
pub mod market_lister;
pub mod ranker;
pub mod trade_fetcher;

pub use aggregator::{aggregate, WalletLedger};
pub use engine::{DiscoveryEngine, DiscoveryReport};
pub use market_lister::MarketLister;
pub use ranker::{rank_wallets, RankedWallets};
pub use trade_fetcher::{FetchedTrades, TradeFetcher};

use thiserror::Error;

use crate::polymarket::gamma_client::GammaClientError;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("market listing unavailable: {0}")]
    MarketListing(#[from] GammaClientError),

    #[error("discovery run cancelled")]
    Cancelled,
}
