//! Dashboard API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::services::Dashboard;
use crate::utils::AppResult;

/// GET /dashboard - 今日营业额、订单数、桌台占用与热销菜品
pub async fn today(State(state): State<ServerState>) -> AppResult<Json<Dashboard>> {
    let dashboard = state.reports.dashboard().await?;
    Ok(Json(dashboard))
}
