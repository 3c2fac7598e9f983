use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::seed::seed_defaults;
use crate::message::NotificationBus;
use crate::orders::OrderService;
use crate::services::{
    BackupService, CatalogService, ReportService, SettingsService, TableService,
};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是句柄 (pool / channel / Arc)，Clone 成本极低，
/// 作为 axum `State` 注入每个 handler。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 数据库连接池 |
/// | bus | NotificationBus | 显示端通知总线 |
/// | orders | OrderService | 订单生命周期 |
/// | catalog | CatalogService | 菜品管理 |
/// | tables | TableService | 桌台管理 |
/// | settings | SettingsService | 餐厅设置 |
/// | backups | BackupService | 备份文件 |
/// | reports | ReportService | 概览与历史 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库连接池
    pub pool: SqlitePool,
    /// 显示端通知总线
    pub bus: NotificationBus,
    pub orders: OrderService,
    pub catalog: CatalogService,
    pub tables: TableService,
    pub settings: SettingsService,
    pub backups: BackupService,
    pub reports: ReportService,
}

impl ServerState {
    /// 用已打开的连接池组装所有服务
    ///
    /// 会启动通知总线的分发循环，必须在 tokio runtime 内调用。
    pub fn from_pool(config: Config, pool: SqlitePool) -> Self {
        let bus = NotificationBus::spawn(config.notify_queue_capacity);
        let tables = TableService::new(pool.clone());
        let backups = BackupService::new(pool.clone(), config.backup_dir());
        let settings = SettingsService::new(pool.clone(), tables.clone(), backups.clone());

        Self {
            orders: OrderService::new(pool.clone(), bus.clone()),
            catalog: CatalogService::new(pool.clone()),
            reports: ReportService::new(pool.clone()),
            tables,
            settings,
            backups,
            bus,
            pool,
            config,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database / backups / logs)
    /// 2. 数据库 (连接 + 迁移)
    /// 3. 首次启动数据 (设置、桌台、示例菜单)
    /// 4. 各服务与通知总线
    pub async fn initialize(config: &Config) -> Result<Self> {
        // 1. Work dir
        config.ensure_work_dirs()?;

        // 2. Database
        let db = DbService::new(&config.database_url())
            .await
            .map_err(ServerError::Database)?;

        // 3. Seed
        seed_defaults(&db.pool, config.table_count, config.seed_demo_menu)
            .await
            .map_err(|e| ServerError::Database(e.into()))?;

        // 4. Services
        Ok(Self::from_pool(config.clone(), db.pool))
    }

    /// 关闭后台任务 (通知总线)
    pub fn shutdown(&self) {
        self.bus.shutdown();
    }
}
