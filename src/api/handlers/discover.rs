use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::discovery::DiscoveryReport;
use crate::errors::AppError;
use crate::models::{AnalysisCriteria, DiscoverQuery};
use crate::AppState;

#[derive(Serialize)]
pub struct DiscoverResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: DiscoveryReport,
}

/// `GET /discover-wallets`
///
/// Bad or duplicated query parameters fall back to defaults rather than
/// rejecting the request. The run is cancelled if the client goes away.
pub async fn discover_wallets(
    State(state): State<AppState>,
    query: Option<Query<DiscoverQuery>>,
) -> Result<Json<DiscoverResponse>, AppError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let criteria = AnalysisCriteria::from_query(&query);

    let cancel = state.shutdown.child_token();
    let _abort_on_drop = cancel.clone().drop_guard();

    tracing::info!(
        min_trades = criteria.min_trades,
        min_volume = %criteria.min_volume,
        lookback_hours = criteria.lookback_hours,
        profitable_only = criteria.profitable_only,
        "Wallet discovery requested"
    );

    let report = state.engine.run(&criteria, &cancel).await?;

    Ok(Json(DiscoverResponse {
        success: true,
        report,
    }))
}
