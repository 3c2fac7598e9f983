//! Settings API Handlers

use axum::{Json, extract::State};
use shared::models::{
    AppSettingsUpdate, PrinterSettingsUpdate, RestaurantSettingsUpdate, Settings,
    TableSettingsUpdate,
};

use crate::core::ServerState;
use crate::services::SettingsOverview;
use crate::utils::{AppResult, Toast};

/// GET /settings - 设置 + 桌台 + 备份列表
pub async fn overview(State(state): State<ServerState>) -> AppResult<Json<SettingsOverview>> {
    let overview = state.settings.overview().await?;
    Ok(Json(overview))
}

/// PUT /settings/restaurant - 餐厅信息
pub async fn update_restaurant(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantSettingsUpdate>,
) -> AppResult<(Toast, Json<Settings>)> {
    let settings = state.settings.update_restaurant(payload).await?;
    Ok((
        Toast::success("Información del restaurante actualizada"),
        Json(settings),
    ))
}

/// PUT /settings/printer - 打印机设置
pub async fn update_printer(
    State(state): State<ServerState>,
    Json(payload): Json<PrinterSettingsUpdate>,
) -> AppResult<(Toast, Json<Settings>)> {
    let settings = state.settings.update_printer(payload).await?;
    Ok((Toast::success("Configuración de impresora actualizada"), Json(settings)))
}

/// PUT /settings/tables - 修改桌台数量
pub async fn update_tables(
    State(state): State<ServerState>,
    Json(payload): Json<TableSettingsUpdate>,
) -> AppResult<(Toast, Json<SettingsOverview>)> {
    let overview = state.settings.update_tables(payload.table_count).await?;
    let toast = Toast::success(format!(
        "Número de mesas actualizado a {}",
        overview.settings.table_count
    ));
    Ok((toast, Json(overview)))
}

/// PUT /settings/app - 应用偏好 (税率、货币符号等)
pub async fn update_app(
    State(state): State<ServerState>,
    Json(payload): Json<AppSettingsUpdate>,
) -> AppResult<(Toast, Json<Settings>)> {
    let settings = state.settings.update_app(payload).await?;
    Ok((Toast::success("Preferencias actualizadas"), Json(settings)))
}
