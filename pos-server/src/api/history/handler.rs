//! Order History API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::services::OrderHistory;
use crate::utils::AppResult;
use crate::utils::time::RangeKind;

/// `?range=today|week|month|custom&start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub range: RangeKind,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /history - 时间范围内已完成的订单 (新的在前)
pub async fn completed_orders(
    State(state): State<ServerState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<OrderHistory>> {
    let history = state
        .reports
        .history(
            query.range,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )
        .await?;
    Ok(Json(history))
}
