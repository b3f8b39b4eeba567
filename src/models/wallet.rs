use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Finalized per-wallet result of one discovery run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletAnalysis {
    pub address: String,
    pub trade_count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub buy_volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sell_volume: Decimal,
    pub markets_traded: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_buy_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_sell_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_pnl: Decimal,
    pub is_profitable: bool,
}

impl WalletAnalysis {
    /// Round for presentation: currency fields to cents, prices to 3 dp.
    pub fn rounded(self) -> Self {
        Self {
            total_volume: round_dp(self.total_volume, 2),
            buy_volume: round_dp(self.buy_volume, 2),
            sell_volume: round_dp(self.sell_volume, 2),
            avg_buy_price: round_dp(self.avg_buy_price, 3),
            avg_sell_price: round_dp(self.avg_sell_price, 3),
            estimated_pnl: round_dp(self.estimated_pnl, 2),
            ..self
        }
    }
}

fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
