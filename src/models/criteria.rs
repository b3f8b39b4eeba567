use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_MIN_TRADES: u32 = 10;
pub const DEFAULT_MIN_VOLUME: i64 = 500;
pub const DEFAULT_LOOKBACK_HOURS: u32 = 48;
pub const MAX_LOOKBACK_HOURS: u32 = 168;

/// Raw `/discover-wallets` query string. Everything stays a string so that
/// bad input falls back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverQuery {
    pub min_trades: Option<String>,
    pub min_volume: Option<String>,
    pub lookback_hours: Option<String>,
    pub profitable_only: Option<String>,
}

/// Validated thresholds for one discovery run. Serializes as the `criteria`
/// echo of the response, which omits `profitable_only`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisCriteria {
    pub min_trades: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub min_volume: Decimal,
    pub lookback_hours: u32,
    #[serde(skip)]
    pub profitable_only: bool,
}

impl Default for AnalysisCriteria {
    fn default() -> Self {
        Self {
            min_trades: DEFAULT_MIN_TRADES,
            min_volume: Decimal::from(DEFAULT_MIN_VOLUME),
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            profitable_only: false,
        }
    }
}

impl AnalysisCriteria {
    pub fn from_query(query: &DiscoverQuery) -> Self {
        let defaults = Self::default();

        let min_trades = query
            .min_trades
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(defaults.min_trades);

        let min_volume = query
            .min_volume
            .as_deref()
            .and_then(parse_decimal)
            .unwrap_or(defaults.min_volume);

        // Zero would exclude every dated trade, so it is treated as unset.
        let lookback_hours = query
            .lookback_hours
            .as_deref()
            .and_then(parse_hours)
            .filter(|h| *h > 0)
            .map(|h| h.min(u64::from(MAX_LOOKBACK_HOURS)) as u32)
            .unwrap_or(defaults.lookback_hours);

        Self {
            min_trades,
            min_volume,
            lookback_hours,
            profitable_only: query.profitable_only.as_deref() == Some("true"),
        }
    }

    /// Oldest timestamp still inside the lookback window.
    pub fn lookback_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::hours(i64::from(self.lookback_hours))
    }
}

/// Whole hours. An all-digit value too large for `u64` saturates so that it
/// still clamps to the maximum instead of reading as unparseable.
fn parse_hours(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.parse::<u64>() {
        Ok(h) => Some(h),
        Err(_) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => Some(u64::MAX),
        Err(_) => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        min_trades: Option<&str>,
        min_volume: Option<&str>,
        lookback_hours: Option<&str>,
        profitable_only: Option<&str>,
    ) -> DiscoverQuery {
        DiscoverQuery {
            min_trades: min_trades.map(Into::into),
            min_volume: min_volume.map(Into::into),
            lookback_hours: lookback_hours.map(Into::into),
            profitable_only: profitable_only.map(Into::into),
        }
    }

    #[test]
    fn test_defaults_when_absent() {
        let criteria = AnalysisCriteria::from_query(&DiscoverQuery::default());
        assert_eq!(criteria.min_trades, 10);
        assert_eq!(criteria.min_volume, Decimal::from(500));
        assert_eq!(criteria.lookback_hours, 48);
        assert!(!criteria.profitable_only);
    }

    #[test]
    fn test_defaults_when_unparseable() {
        let criteria =
            AnalysisCriteria::from_query(&query(Some("many"), Some("lots"), Some("-3"), Some("yes")));
        assert_eq!(criteria, AnalysisCriteria::default());
    }

    #[test]
    fn test_lookback_clamped() {
        let criteria = AnalysisCriteria::from_query(&query(None, None, Some("1000"), None));
        assert_eq!(criteria.lookback_hours, MAX_LOOKBACK_HOURS);

        let criteria = AnalysisCriteria::from_query(&query(None, None, Some("0"), None));
        assert_eq!(criteria.lookback_hours, DEFAULT_LOOKBACK_HOURS);

        for huge in ["5000000000", "99999999999999999999999"] {
            let criteria = AnalysisCriteria::from_query(&query(None, None, Some(huge), None));
            assert_eq!(criteria.lookback_hours, MAX_LOOKBACK_HOURS, "{huge}");
        }
    }

    #[test]
    fn test_profitable_only_literal_true() {
        assert!(AnalysisCriteria::from_query(&query(None, None, None, Some("true"))).profitable_only);
        assert!(!AnalysisCriteria::from_query(&query(None, None, None, Some("TRUE"))).profitable_only);
        assert!(!AnalysisCriteria::from_query(&query(None, None, None, Some("1"))).profitable_only);
    }

    #[test]
    fn test_parses_explicit_values() {
        let criteria =
            AnalysisCriteria::from_query(&query(Some("3"), Some("1250.5"), Some("24"), Some("true")));
        assert_eq!(criteria.min_trades, 3);
        assert_eq!(criteria.min_volume, Decimal::new(12_505, 1));
        assert_eq!(criteria.lookback_hours, 24);
        assert!(criteria.profitable_only);
    }

    #[test]
    fn test_echo_omits_profitable_only() {
        let json = serde_json::to_value(AnalysisCriteria::default()).unwrap();
        assert_eq!(json["min_trades"], 10);
        assert_eq!(json["min_volume"], 500.0);
        assert_eq!(json["lookback_hours"], 48);
        assert!(json.get("profitable_only").is_none());
    }
}
