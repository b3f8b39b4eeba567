use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::config::PnlHeuristics;
use crate::models::{Side, Trade, WalletAnalysis};

/// One fill contributing to a wallet's position in a market.
#[derive(Debug, Clone, Copy)]
struct Lot {
    price: Decimal,
    size: Decimal,
}

/// Buy and sell lots of one wallet in one market.
#[derive(Debug, Default)]
struct MarketBook {
    buys: Vec<Lot>,
    sells: Vec<Lot>,
}

impl MarketBook {
    fn matched_size(&self) -> Decimal {
        total_size(&self.buys).min(total_size(&self.sells))
    }

    /// PnL contribution of this market, by priority:
    /// both sides seen → realized on the matched size;
    /// sells only → exit of a position opened before the window;
    /// buys only → still holding, nothing realized.
    fn estimated_pnl(&self, heuristics: &PnlHeuristics) -> Decimal {
        match (self.buys.is_empty(), self.sells.is_empty()) {
            (false, false) => {
                (average_price(&self.sells) - average_price(&self.buys)) * self.matched_size()
            }
            (true, false) => {
                total_size(&self.sells)
                    * (average_price(&self.sells) - heuristics.assumed_entry_price)
            }
            _ => Decimal::ZERO,
        }
    }
}

/// Running per-wallet totals for one discovery run.
#[derive(Debug, Default)]
pub struct WalletLedger {
    trade_count: u32,
    total_volume: Decimal,
    buy_volume: Decimal,
    sell_volume: Decimal,
    buy_count: u32,
    buy_price_sum: Decimal,
    sell_count: u32,
    sell_price_sum: Decimal,
    markets: HashMap<String, MarketBook>,
}

impl WalletLedger {
    pub fn record(&mut self, trade: &Trade) {
        let notional = trade.notional();
        let lot = Lot {
            price: trade.price,
            size: trade.size,
        };
        let book = self.markets.entry(trade.market_id.clone()).or_default();

        self.trade_count += 1;
        self.total_volume += notional;

        match trade.side {
            Side::Buy => {
                self.buy_volume += notional;
                self.buy_count += 1;
                self.buy_price_sum += trade.price;
                book.buys.push(lot);
            }
            Side::Sell => {
                self.sell_volume += notional;
                self.sell_count += 1;
                self.sell_price_sum += trade.price;
                book.sells.push(lot);
            }
        }
    }

    pub fn trade_count(&self) -> u32 {
        self.trade_count
    }

    /// Size that can be paired between buys and sells in `market_id`.
    pub fn matched_size(&self, market_id: &str) -> Decimal {
        self.markets
            .get(market_id)
            .map(MarketBook::matched_size)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn avg_buy_price(&self) -> Decimal {
        safe_div(self.buy_price_sum, Decimal::from(self.buy_count))
    }

    pub fn avg_sell_price(&self) -> Decimal {
        safe_div(self.sell_price_sum, Decimal::from(self.sell_count))
    }

    pub fn estimated_pnl(&self, heuristics: &PnlHeuristics) -> Decimal {
        self.markets
            .values()
            .map(|book| book.estimated_pnl(heuristics))
            .sum()
    }

    /// Sell-only wallets are judged on exit price, buy-only wallets are never
    /// profitable, everything else on the PnL estimate.
    fn is_profitable(&self, estimated_pnl: Decimal, heuristics: &PnlHeuristics) -> bool {
        if self.buy_count == 0 {
            self.avg_sell_price() > heuristics.sell_only_profit_threshold
        } else if self.sell_count == 0 {
            false
        } else {
            estimated_pnl > Decimal::ZERO
        }
    }

    pub fn finalize(self, address: String, heuristics: &PnlHeuristics) -> WalletAnalysis {
        let estimated_pnl = self.estimated_pnl(heuristics);

        WalletAnalysis {
            address,
            trade_count: self.trade_count,
            total_volume: self.total_volume,
            buy_volume: self.buy_volume,
            sell_volume: self.sell_volume,
            markets_traded: self.markets.len(),
            avg_buy_price: self.avg_buy_price(),
            avg_sell_price: self.avg_sell_price(),
            estimated_pnl,
            is_profitable: self.is_profitable(estimated_pnl, heuristics),
        }
    }
}

/// Fold trades into one ledger per wallet and finalize each ledger.
pub fn aggregate(trades: &[Trade], heuristics: &PnlHeuristics) -> Vec<WalletAnalysis> {
    let mut ledgers: HashMap<&str, WalletLedger> = HashMap::new();

    for trade in trades {
        ledgers.entry(trade.wallet.as_str()).or_default().record(trade);
    }

    ledgers
        .into_iter()
        .map(|(address, ledger)| ledger.finalize(address.to_string(), heuristics))
        .collect()
}

fn total_size(lots: &[Lot]) -> Decimal {
    lots.iter().map(|l| l.size).sum()
}

fn average_price(lots: &[Lot]) -> Decimal {
    let sum: Decimal = lots.iter().map(|l| l.price).sum();
    safe_div(sum, Decimal::from(lots.len() as u64))
}

fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
