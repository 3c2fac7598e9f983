//! Backup Model

use serde::{Deserialize, Serialize};

/// Backup metadata record. The file itself is a placeholder snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Backup {
    pub id: i64,
    pub file_name: String,
    pub file_path: String,
    /// Size in bytes
    pub size: i64,
    pub created_at: i64,
}
