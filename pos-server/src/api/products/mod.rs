//! Product API 模块
//!
//! 菜品管理 + 点单菜单

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/menu", get(handler::menu))
        .route(
            "/categories",
            get(handler::categories).post(handler::create_category),
        )
        .nest("/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/bulk", post(handler::bulk))
        .route("/category/{category}", get(handler::list_by_category))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
