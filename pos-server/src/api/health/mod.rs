//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 (含数据库检查) |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "uptime_seconds": 3600,
//!   "checks": { "database": { "status": "ok", "latency_ms": 1 } },
//!   "displays": { "orders": 1, "kitchen": 1, "clients": [...] }
//! }
//! ```

use std::time::{Instant, SystemTime};

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use shared::message::DisplayTopic;

use crate::core::ServerState;
use crate::message::ConnectedDisplay;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | degraded)
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    checks: HealthChecks,
    displays: DisplayCounts,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
}

/// 已连接的显示端数量
#[derive(Serialize)]
pub struct DisplayCounts {
    orders: usize,
    kitchen: usize,
    /// 每个连接的主题、地址与连接时间
    clients: Vec<ConnectedDisplay>,
}

/// 单项检查结果
#[derive(Serialize)]
pub struct CheckResult {
    /// 状态 (ok | error)
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// 服务器启动时间 (懒加载静态变量)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

/// 记录启动时间，服务启动时调用一次
pub fn mark_started() {
    START_TIME.get_or_init(SystemTime::now);
}

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// GET /health - 数据库不可用时返回 503
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => CheckResult::ok_with_latency(started.elapsed().as_millis() as u64),
        Err(e) => {
            tracing::warn!("Health check database query failed: {e}");
            CheckResult::error(e.to_string())
        }
    };

    let (status_code, status) = if database.is_ok() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
        checks: HealthChecks { database },
        displays: DisplayCounts {
            orders: state.bus.connected_count(DisplayTopic::Orders),
            kitchen: state.bus.connected_count(DisplayTopic::Kitchen),
            clients: state.bus.connected_displays(),
        },
    };
    (status_code, Json(body))
}
