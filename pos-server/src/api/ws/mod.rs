//! 显示端推送 (WebSocket)
//!
//! # 路由列表
//!
//! | 路径 | 说明 |
//! |------|------|
//! | /ws/orders | 前台显示端，接收 `order_update` |
//! | /ws/kitchen | 厨房显示端，接收 `kitchen_update` |
//!
//! 服务端只推不收：客户端发来的文本帧被忽略，Ping 回 Pong。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/ws/orders", get(handler::orders_ws))
        .route("/ws/kitchen", get(handler::kitchen_ws))
}
