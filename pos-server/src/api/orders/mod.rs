//! Order API 模块
//!
//! 订单生命周期：创建 → (提交) → 送厨 → 完成/取消。
//! 所有变更走 [`OrderService`](crate::orders::OrderService)，提交后推送显示端。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list_active).post(handler::create))
        .nest("/order", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/submit", post(handler::submit))
        .route("/{id}/item", post(handler::add_item))
        .route("/{id}/item/{item_id}", delete(handler::remove_item))
        .route("/item/{id}", put(handler::update_item))
        .route("/{id}/notes", put(handler::update_notes))
        .route("/{id}/process", post(handler::send_to_kitchen))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/cancel", post(handler::cancel))
}
