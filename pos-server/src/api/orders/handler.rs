//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{
    DiningTable, Order, OrderCreate, OrderDetail, OrderItemInput, OrderItemUpdate,
    OrderNotesUpdate,
};

use crate::api::convert::parse_id;
use crate::core::ServerState;
use crate::utils::{AppResult, Toast};

/// 前台订单页：活动订单 + 可开台的空闲桌台
#[derive(Debug, Serialize)]
pub struct ActiveOrders {
    pub orders: Vec<OrderDetail>,
    pub free_tables: Vec<DiningTable>,
}

/// GET /orders - 活动订单 (未完成/未取消)
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<ActiveOrders>> {
    let orders = state.orders.list_active().await?;
    let free_tables = state.tables.list_free().await?;
    Ok(Json(ActiveOrders {
        orders,
        free_tables,
    }))
}

/// POST /orders - 开台下单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let detail = state.orders.create(payload).await?;
    let toast = Toast::success(format!(
        "Orden #{} creada para la mesa {}",
        detail.order.id, detail.order.table_number
    ))
    .with_redirect(format!("/order/{}", detail.order.id));
    Ok((toast, Json(detail)))
}

/// GET /order/:id - 订单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let id = parse_id(&id, "order_id")?;
    let detail = state.orders.get(id).await?;
    Ok(Json(detail))
}

/// POST /order/:id/submit - 草稿提交 (draft → pending)
pub async fn submit(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let id = parse_id(&id, "order_id")?;
    let detail = state.orders.submit(id).await?;
    Ok((Toast::success("Orden enviada"), Json(detail)))
}

/// POST /order/:id/item - 加菜
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderItemInput>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let id = parse_id(&id, "order_id")?;
    let detail = state.orders.add_item(id, payload).await?;
    Ok((Toast::success("Producto agregado a la orden"), Json(detail)))
}

/// PUT /order/item/:id - 修改数量 (0 = 删除)
pub async fn update_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderItemUpdate>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let id = parse_id(&id, "item_id")?;
    let detail = state.orders.update_item_quantity(id, payload.quantity).await?;
    let message = if payload.quantity == 0 {
        "Producto eliminado de la orden"
    } else {
        "Cantidad actualizada"
    };
    Ok((Toast::success(message), Json(detail)))
}

/// DELETE /order/:id/item/:item_id - 删除明细
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let id = parse_id(&id, "order_id")?;
    let item_id = parse_id(&item_id, "item_id")?;
    let detail = state.orders.remove_item(id, item_id).await?;
    Ok((Toast::success("Producto eliminado de la orden"), Json(detail)))
}

/// PUT /order/:id/notes - 修改备注
pub async fn update_notes(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderNotesUpdate>,
) -> AppResult<(Toast, Json<Order>)> {
    let id = parse_id(&id, "order_id")?;
    let order = state.orders.update_notes(id, payload.notes.as_deref()).await?;
    Ok((Toast::success("Notas actualizadas"), Json(order)))
}

/// POST /order/:id/process - 送厨 (pending → in_progress)
pub async fn send_to_kitchen(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let id = parse_id(&id, "order_id")?;
    let detail = state.orders.send_to_kitchen(id).await?;
    Ok((Toast::success("Orden enviada a cocina"), Json(detail)))
}

/// POST /order/:id/complete - 完成并释放桌台
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let id = parse_id(&id, "order_id")?;
    let detail = state.orders.complete(id).await?;
    Ok((Toast::success("Orden completada"), Json(detail)))
}

/// POST /order/:id/cancel - 取消并释放桌台
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<OrderDetail>)> {
    let id = parse_id(&id, "order_id")?;
    let detail = state.orders.cancel(id).await?;
    Ok((Toast::info("Orden cancelada"), Json(detail)))
}
