//! Backup API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/backup", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/list", get(handler::list))
        .route("/{id}/download", get(handler::download))
        .route("/{id}", delete(handler::delete))
}
