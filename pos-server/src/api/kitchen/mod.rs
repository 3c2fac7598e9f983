//! Kitchen API 模块
//!
//! 厨房显示端：待做/在做订单、逐项出餐、完成率与出餐统计

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/kitchen", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::tickets))
        .route("/orders", get(handler::tickets))
        .route("/stats", get(handler::stats))
        .route("/items/{id}/toggle", put(handler::toggle_item))
        .route("/order/{id}/complete", post(handler::complete))
        .route("/order/{id}/status", get(handler::completion_status))
}
