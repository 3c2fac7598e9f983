//! POS Server - 餐厅点单与后厨同步服务
//!
//! # 架构概述
//!
//! - **订单** (`orders`): 订单状态机、明细、桌台占用联动、厨房视图
//! - **数据库** (`db`): SQLite 连接池、迁移、repository
//! - **通知** (`message`): 前台/厨房显示端推送总线
//! - **服务** (`services`): 菜品、桌台、设置、备份、报表
//! - **HTTP API** (`api`): REST 接口 + WebSocket
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单生命周期 + 厨房视图
//! ├── services/      # 其他业务服务
//! ├── db/            # 数据库层
//! ├── message/       # 显示端通知总线
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod message;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use message::NotificationBus;
pub use orders::{OrderError, OrderService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____  ____  _____
   / __ \/ __ \/ ___/
  / /_/ / / / /\__ \
 / ____/ /_/ /___/ /
/_/    \____//____/
    "#
    );
}
