use std::cmp::Ordering;

use crate::models::{AnalysisCriteria, WalletAnalysis};

/// Output of the filter/rank stage.
#[derive(Debug, Clone)]
pub struct RankedWallets {
    /// Wallets that met every criterion, before the output cap.
    pub qualifying: usize,
    /// Best `max_results` of them, rounded and ordered.
    pub wallets: Vec<WalletAnalysis>,
}

pub fn meets_criteria(wallet: &WalletAnalysis, criteria: &AnalysisCriteria) -> bool {
    wallet.trade_count >= criteria.min_trades
        && wallet.total_volume >= criteria.min_volume
        && (!criteria.profitable_only || wallet.is_profitable)
}

/// Highest PnL first, then highest volume; address keeps the order total.
fn by_rank(a: &WalletAnalysis, b: &WalletAnalysis) -> Ordering {
    b.estimated_pnl
        .cmp(&a.estimated_pnl)
        .then_with(|| b.total_volume.cmp(&a.total_volume))
        .then_with(|| a.address.cmp(&b.address))
}

/// Filter on exact values, then round and order. Rounding happens before the
/// sort so that the published numbers are themselves in rank order.
pub fn rank_wallets(
    wallets: Vec<WalletAnalysis>,
    criteria: &AnalysisCriteria,
    max_results: usize,
) -> RankedWallets {
    let mut qualified: Vec<WalletAnalysis> = wallets
        .into_iter()
        .filter(|w| meets_criteria(w, criteria))
        .map(WalletAnalysis::rounded)
        .collect();

    let qualifying = qualified.len();
    qualified.sort_by(by_rank);
    qualified.truncate(max_results);

    RankedWallets {
        qualifying,
        wallets: qualified,
    }
}
