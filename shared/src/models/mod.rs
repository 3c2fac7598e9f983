//! Data models
//!
//! Shared between pos-server and display clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod backup;
pub mod dining_table;
pub mod order;
pub mod product;
pub mod settings;

// Re-exports
pub use backup::*;
pub use dining_table::*;
pub use order::*;
pub use product::*;
pub use settings::*;
