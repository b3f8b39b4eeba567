use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::types::ApiTrade;
use crate::models::{Side, Trade};

/// Price assumed when the venue omits it: the midpoint of a binary market.
pub const MISSING_PRICE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Largest share count accepted from the feed. Bigger or negative sizes are
/// clamped so that per-wallet sums and products stay far from `Decimal`'s
/// range.
pub const MAX_TRADE_SIZE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Resolve a raw venue trade into a fully typed [`Trade`].
///
/// `market_id` is the market the record was fetched for and backs up a
/// missing condition ID. Missing price becomes [`MISSING_PRICE`], missing
/// size becomes zero, an unparseable timestamp becomes `None`, and any side
/// other than BUY counts as SELL. Price is clamped to 0..1 and size to
/// 0..[`MAX_TRADE_SIZE`]. Returns `None` only when no wallet
/// address can be resolved.
pub fn sanitize_trade(raw: &ApiTrade, market_id: &str) -> Option<Trade> {
    let wallet = raw.wallet_address()?.trim().to_lowercase();

    let market_id = raw
        .condition_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(market_id)
        .to_string();

    let side = raw
        .side
        .as_deref()
        .and_then(Side::from_api_str)
        .unwrap_or(Side::Sell);

    let price = raw
        .price
        .as_ref()
        .and_then(parse_decimal)
        .unwrap_or(MISSING_PRICE)
        .clamp(Decimal::ZERO, Decimal::ONE);
    let size = raw
        .size
        .as_ref()
        .and_then(parse_decimal)
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, MAX_TRADE_SIZE);

    Some(Trade {
        wallet,
        market_id,
        side,
        price,
        size,
        timestamp: parse_trade_timestamp(raw.timestamp.as_ref()),
    })
}

fn parse_decimal(v: &serde_json::Value) -> Option<Decimal> {
    match v {
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        _ => None,
    }
}

/// Parse a venue timestamp: unix seconds or milliseconds (number or numeric
/// string) or an RFC 3339 string.
pub fn parse_trade_timestamp(ts: Option<&serde_json::Value>) -> Option<DateTime<Utc>> {
    match ts? {
        serde_json::Value::Number(n) => n.as_i64().and_then(from_unix),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Ok(secs) = s.parse::<i64>() {
                return from_unix(secs);
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}

fn from_unix(value: i64) -> Option<DateTime<Utc>> {
    // Anything past year ~5138 in seconds is a millisecond timestamp.
    if value.abs() >= 100_000_000_000 {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}
