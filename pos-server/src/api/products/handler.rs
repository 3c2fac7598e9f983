//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{
    BulkAction, CategoryCreate, MenuSection, Product, ProductBulkRequest, ProductCreate, ProductRemoval,
    ProductUpdate,
};

use crate::api::convert::parse_id;
use crate::core::ServerState;
use crate::services::BulkOutcome;
use crate::utils::{AppResult, Toast};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// GET /menu - 可售菜品，按分类分组
pub async fn menu(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuSection>>> {
    let menu = state.catalog.menu().await?;
    Ok(Json(menu))
}

/// GET /categories - 分类列表
pub async fn categories(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let categories = state.catalog.categories().await?;
    Ok(Json(categories))
}

/// POST /categories - 新建分类，返回全部分类
pub async fn create_category(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(Toast, Json<Vec<String>>)> {
    let name = payload.name.trim().to_string();
    let categories = state.catalog.create_category(payload).await?;
    let toast = Toast::success(format!("Categoría '{name}' creada con éxito"));
    Ok((toast, Json(categories)))
}

/// GET /products - 全部菜品 (可按 category 过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());
    let products = state.catalog.list(category).await?;
    Ok(Json(products))
}

/// GET /products/category/:category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog.list(Some(&category)).await?;
    Ok(Json(products))
}

/// POST /products - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(Toast, Json<Product>)> {
    let product = state.catalog.create(payload).await?;
    let toast = Toast::success(format!("Producto \"{}\" creado", product.name));
    Ok((toast, Json(product)))
}

/// PUT /products/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<(Toast, Json<Product>)> {
    let id = parse_id(&id, "product_id")?;
    let product = state.catalog.update(id, payload).await?;
    Ok((Toast::success("Producto actualizado"), Json(product)))
}

/// DELETE /products/:id - 删除菜品 (被订单引用时改为下架)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<(Toast, Json<ProductRemoval>)> {
    let id = parse_id(&id, "product_id")?;
    let removal = state.catalog.delete(id).await?;
    let toast = match removal {
        ProductRemoval::Deleted => Toast::success("Producto eliminado"),
        ProductRemoval::Disabled => {
            Toast::info("El producto tiene pedidos asociados; se marcó como no disponible")
        }
    };
    Ok((toast, Json(removal)))
}

/// POST /products/bulk - 批量上架/下架/删除
pub async fn bulk(
    State(state): State<ServerState>,
    Json(payload): Json<ProductBulkRequest>,
) -> AppResult<(Toast, Json<BulkOutcome>)> {
    let action = payload.action;
    let outcome = state.catalog.bulk(payload).await?;
    let message = match action {
        BulkAction::Enable => format!("{} productos activados", outcome.updated),
        BulkAction::Disable => format!("{} productos desactivados", outcome.updated),
        BulkAction::Delete => format!(
            "{} productos eliminados, {} desactivados",
            outcome.deleted, outcome.disabled
        ),
    };
    Ok((Toast::success(message), Json(outcome)))
}
