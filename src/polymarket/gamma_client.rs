use reqwest::Client;
use thiserror::Error;

use super::types::GammaMarket;

#[derive(Debug, Error)]
pub enum GammaClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Market listing client for the Gamma API.
#[derive(Debug, Clone)]
pub struct GammaClient {
    http: Client,
    base_url: String,
}

impl GammaClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch up to `limit` non-closed markets, in listing order.
    pub async fn get_open_markets(&self, limit: u32) -> Result<Vec<GammaMarket>, GammaClientError> {
        let url = format!("{}/markets", self.base_url);
        tracing::debug!(url = %url, limit, "Fetching market listing");
        let limit = limit.to_string();

        let resp = self
            .http
            .get(&url)
            .query(&[("closed", "false"), ("limit", limit.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = resp.json().await?;
        if !body.is_array() {
            return Err(GammaClientError::Unexpected(format!(
                "market listing is not an array: {}",
                truncate(&body.to_string(), 120)
            )));
        }

        let markets: Vec<GammaMarket> = serde_json::from_value(body)
            .map_err(|e| GammaClientError::Unexpected(e.to_string()))?;
        Ok(markets)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
