//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`dashboard`] - 今日经营概览
//! - [`tables`] - 桌台管理接口
//! - [`products`] - 菜品与菜单接口
//! - [`orders`] - 订单生命周期接口
//! - [`kitchen`] - 厨房视图与出餐接口
//! - [`history`] - 历史订单
//! - [`settings`] - 餐厅设置接口
//! - [`backups`] - 备份文件接口
//! - [`ws`] - 显示端推送 (WebSocket)

pub mod convert;

pub mod backups;
pub mod dashboard;
pub mod health;
pub mod history;
pub mod kitchen;
pub mod orders;
pub mod products;
pub mod settings;
pub mod tables;
pub mod ws;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::AppResult;

/// 组装全部路由
pub fn build_router(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    Router::new()
        .merge(health::router())
        .merge(dashboard::router())
        .merge(tables::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(kitchen::router())
        .merge(history::router())
        .merge(settings::router())
        .merge(backups::router())
        .merge(ws::router())
        .layer(timeout_layer(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 超时请求返回 408
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    "done"
                }),
            )
            .layer(timeout_layer(Duration::from_millis(20)));

        let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
