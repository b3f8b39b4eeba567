use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;

/// A sanitized fill observed on the venue. Every field is resolved; missing
/// upstream values have already been defaulted by the sanitizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Canonical (lowercased) wallet address.
    pub wallet: String,
    /// Market condition ID.
    pub market_id: String,
    pub side: Side,
    /// Probability-style price in 0..1.
    pub price: Decimal,
    /// Number of shares.
    pub size: Decimal,
    /// `None` when the upstream timestamp could not be parsed.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Trade {
    /// Currency notional of the fill: `size * price`.
    pub fn notional(&self) -> Decimal {
        self.size * self.price
    }

    /// Trades of unknown age are kept.
    pub fn within_lookback(&self, cutoff: DateTime<Utc>) -> bool {
        match self.timestamp {
            Some(ts) => ts >= cutoff,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn trade_at(timestamp: Option<DateTime<Utc>>) -> Trade {
        Trade {
            wallet: "0xabc".into(),
            market_id: "0xmarket".into(),
            side: Side::Buy,
            price: Decimal::new(40, 2),
            size: Decimal::from(100),
            timestamp,
        }
    }

    #[test]
    fn test_notional() {
        assert_eq!(trade_at(None).notional(), Decimal::from(40));
    }

    #[test]
    fn test_within_lookback() {
        let now = Utc::now();
        let cutoff = now - Duration::hours(48);

        assert!(trade_at(Some(now - Duration::hours(1))).within_lookback(cutoff));
        assert!(!trade_at(Some(now - Duration::hours(49))).within_lookback(cutoff));
        assert!(trade_at(None).within_lookback(cutoff), "unknown age is kept");
    }
}
