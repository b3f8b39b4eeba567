use serde::{Deserialize, Serialize};

/// A listed market that drives which trade feeds are visited in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub condition_id: String,
    pub active: bool,
}
