//! Backup API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use shared::models::Backup;

use crate::api::convert::parse_id;
use crate::core::ServerState;
use crate::utils::{AppResult, Toast};

/// POST /backup - 生成备份
pub async fn create(State(state): State<ServerState>) -> AppResult<(Toast, Json<Backup>)> {
    let backup = state.backups.create().await?;
    let toast = Toast::success(format!("Respaldo creado: {}", backup.file_name));
    Ok((toast, Json(backup)))
}

/// GET /backup/list - 备份列表 (新的在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Backup>>> {
    let backups = state.backups.list().await?;
    Ok(Json(backups))
}

/// GET /backup/:id/download - 下载备份文件
pub async fn download(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "backup_id")?;
    let file = state.backups.download(id).await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.file_name
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/sql")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    )
        .into_response())
}

/// DELETE /backup/:id - 删除备份 (文件 + 记录)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<bool>)> {
    let id = parse_id(&id, "backup_id")?;
    state.backups.delete(id).await?;
    Ok((Toast::success("Respaldo eliminado"), Json(true)))
}
