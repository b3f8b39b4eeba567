use reqwest::Client;
use thiserror::Error;

use super::types::ApiTrade;

#[derive(Debug, Error)]
pub enum DataClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}

/// Trades-by-market client for the Data API.
#[derive(Debug, Clone)]
pub struct DataClient {
    http: Client,
    base_url: String,
}

impl DataClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the most recent `limit` trades for a market.
    ///
    /// Records are decoded one by one; a record that is not an object is
    /// skipped without affecting the rest of the page.
    pub async fn get_market_trades(
        &self,
        condition_id: &str,
        limit: u32,
    ) -> Result<Vec<ApiTrade>, DataClientError> {
        let url = format!("{}/trades", self.base_url);
        let limit = limit.to_string();
        let resp = self
            .http
            .get(&url)
            .query(&[("market", condition_id), ("limit", limit.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let records: Vec<serde_json::Value> = resp.json().await?;
        Ok(decode_trades(condition_id, records))
    }
}

fn decode_trades(condition_id: &str, records: Vec<serde_json::Value>) -> Vec<ApiTrade> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<ApiTrade>(record) {
            Ok(trade) => Some(trade),
            Err(e) => {
                tracing::debug!(market = %condition_id, error = %e, "Skipping undecodable trade record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_trades_skips_only_bad_records() {
        let trades = decode_trades(
            "0xm",
            vec![
                json!({ "proxyWallet": "0xa", "side": "BUY", "size": 10, "price": 0.4 }),
                json!("not a trade"),
                json!({ "maker": 42, "side": 1, "size": "3" }),
            ],
        );

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].wallet_address(), Some("0xa"));
        assert_eq!(trades[1].wallet_address(), Some("42"));
        assert_eq!(trades[1].side.as_deref(), Some("1"));
    }
}
