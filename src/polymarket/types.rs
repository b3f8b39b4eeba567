use serde::{Deserialize, Deserializer, Serialize};

use crate::models::MarketSummary;

// ---------------------------------------------------------------------------
// Market (Gamma API)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GammaMarket {
    #[serde(default, alias = "conditionId")]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub closed: Option<bool>,
}

impl GammaMarket {
    /// Convert to a summary, dropping entries without a condition ID or
    /// that are already closed.
    pub fn into_summary(self) -> Option<MarketSummary> {
        if self.closed == Some(true) {
            return None;
        }
        let condition_id = self.condition_id.filter(|id| !id.is_empty())?;
        Some(MarketSummary {
            condition_id,
            active: self.active.unwrap_or(true),
        })
    }
}

// ---------------------------------------------------------------------------
// Trade (Data API)
// ---------------------------------------------------------------------------

/// Trade record as served by the trades-by-market endpoint. Numeric fields
/// arrive as either JSON numbers or strings, so they stay untyped here and
/// are resolved by the sanitizer. String fields accept numbers too, and any
/// other shape reads as absent, so one odd field never rejects the record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiTrade {
    #[serde(default, alias = "maker_address", deserialize_with = "lenient_string")]
    pub maker: Option<String>,
    #[serde(default, alias = "proxyWallet", deserialize_with = "lenient_string")]
    pub proxy_wallet: Option<String>,
    #[serde(default, alias = "conditionId", deserialize_with = "lenient_string")]
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub side: Option<String>,
    #[serde(default)]
    pub size: Option<serde_json::Value>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
}

impl ApiTrade {
    /// Wallet that made the fill: `maker` when present, else the proxy wallet.
    pub fn wallet_address(&self) -> Option<&str> {
        self.maker
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| self.proxy_wallet.as_deref().filter(|a| !a.trim().is_empty()))
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
