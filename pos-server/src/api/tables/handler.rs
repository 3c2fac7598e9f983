//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DiningTable, DiningTableCreate};

use crate::api::convert::parse_id;
use crate::core::ServerState;
use crate::utils::{AppResult, Toast};

/// GET /tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.tables.list().await?;
    Ok(Json(tables))
}

/// POST /tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(Toast, Json<DiningTable>)> {
    let table = state.tables.create(payload).await?;
    let toast = Toast::success(format!("Mesa {} creada", table.number));
    Ok((toast, Json(table)))
}

/// DELETE /tables/:id - 删除桌台 (占用中拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<bool>)> {
    let id = parse_id(&id, "table_id")?;
    state.tables.delete(id).await?;
    Ok((Toast::success("Mesa eliminada"), Json(true)))
}

/// POST /tables/reset - 按设置的数量重建全部桌台
pub async fn reset(
    State(state): State<ServerState>,
) -> AppResult<(Toast, Json<Vec<DiningTable>>)> {
    let tables = state.tables.reset().await?;
    Ok((Toast::success("Mesas reiniciadas"), Json(tables)))
}
