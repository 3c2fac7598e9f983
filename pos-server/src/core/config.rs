use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、备份、日志) |
/// | DATABASE_URL | sqlite:{WORK_DIR}/database/pos.db | 数据库位置 |
/// | HTTP_PORT | 3001 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | TABLE_COUNT | 12 | 首次启动时的桌台数量 |
/// | NOTIFY_QUEUE_CAPACITY | 64 | 每个显示端分组的推送队列容量 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SEED_DEMO_MENU | true | 空菜单时写入示例菜品 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pos HTTP_PORT=8080 cargo run -p pos-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 数据库 URL，未设置时位于工作目录下
    pub database_url: Option<String>,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    /// tracing 日志级别
    pub log_level: String,
    /// 首次启动写入 settings 的桌台数量
    pub table_count: i32,
    /// 显示端推送队列容量 (满时丢弃最旧消息)
    pub notify_queue_capacity: usize,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 空菜单时写入示例菜品
    pub seed_demo_menu: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            database_url: std::env::var("DATABASE_URL").ok(),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            table_count: std::env::var("TABLE_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &i32| *n > 0)
                .unwrap_or(12),
            notify_queue_capacity: std::env::var("NOTIFY_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(64),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            seed_demo_menu: std::env::var("SEED_DEMO_MENU")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// 使用自定义工作目录
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_url = None;
        config
    }

    /// 数据库 URL
    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(|| {
            format!("sqlite:{}", self.database_dir().join("pos.db").display())
        })
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 备份文件目录
    pub fn backup_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("backups")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.backup_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let config = Config::with_work_dir("/tmp/pos-test");
        assert_eq!(config.backup_dir(), PathBuf::from("/tmp/pos-test/backups"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/pos-test/logs"));
        assert_eq!(config.database_url(), "sqlite:/tmp/pos-test/database/pos.db");
    }
}
