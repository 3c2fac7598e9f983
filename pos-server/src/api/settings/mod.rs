//! Settings API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/settings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::overview))
        .route("/restaurant", put(handler::update_restaurant))
        .route("/printer", put(handler::update_printer))
        .route("/tables", put(handler::update_tables))
        .route("/app", put(handler::update_app))
}
