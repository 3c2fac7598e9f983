//! Kitchen API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::OrderDetail;

use crate::api::convert::parse_id;
use crate::core::ServerState;
use crate::orders::kitchen::{self, DEFAULT_STATS_DAYS};
use crate::orders::{CompletionStatus, ItemToggle, KitchenStats, KitchenTicket};
use crate::utils::{AppResult, Toast};

const ALL_READY_MESSAGE: &str = "¡Todos los productos están listos! Puede completar la orden.";

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub days: Option<i64>,
}

/// GET /kitchen, /kitchen/orders - 待做与在做订单 (最早的在前)
pub async fn tickets(State(state): State<ServerState>) -> AppResult<Json<Vec<KitchenTicket>>> {
    let tickets = kitchen::kitchen_view(&state.pool).await?;
    Ok(Json(tickets))
}

/// PUT /kitchen/items/:id/toggle - 切换出餐状态
pub async fn toggle_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<ItemToggle>)> {
    let id = parse_id(&id, "item_id")?;
    let toggle = state.orders.toggle_item(id).await?;
    let toast = if toggle.all_ready {
        Toast::success(ALL_READY_MESSAGE)
    } else if toggle.item.is_ready {
        Toast::success(format!("{} listo", toggle.item.product_name))
    } else {
        Toast::info(format!("{} marcado como pendiente", toggle.item.product_name))
    };
    Ok((toast, Json(toggle)))
}

/// POST /kitchen/order/:id/complete - 厨房完成订单
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let id = parse_id(&id, "order_id")?;
    let detail = state.orders.complete(id).await?;
    let toast = Toast::success(format!("Orden #{} completada", detail.order.id));
    Ok((toast, Json(detail)))
}

/// GET /kitchen/order/:id/status - 完成率
pub async fn completion_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CompletionStatus>> {
    let id = parse_id(&id, "order_id")?;
    let status = kitchen::completion_status(&state.pool, id).await?;
    Ok(Json(status))
}

/// GET /kitchen/stats?days=30 - 出餐时间统计
pub async fn stats(
    State(state): State<ServerState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<KitchenStats>> {
    let days = query.days.unwrap_or(DEFAULT_STATS_DAYS);
    let stats = kitchen::kitchen_stats(&state.pool, days).await?;
    Ok(Json(stats))
}
