//! 服务层 - 订单以外的业务服务
//!
//! # 服务列表
//!
//! - [`CatalogService`] - 菜品与分类管理
//! - [`TableService`] - 桌台管理 (创建/删除/重置/调整数量)
//! - [`SettingsService`] - 餐厅设置
//! - [`BackupService`] - 备份文件管理
//! - [`ReportService`] - 今日经营概览与历史订单

pub mod backup;
pub mod catalog;
pub mod report;
pub mod settings;
pub mod tables;

pub use backup::{BackupFile, BackupService};
pub use catalog::{BulkOutcome, CatalogService};
pub use report::{Dashboard, OrderHistory, ReportService};
pub use settings::{SettingsOverview, SettingsService};
pub use tables::TableService;
