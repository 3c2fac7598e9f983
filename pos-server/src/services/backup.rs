//! Backup Service - 备份文件管理
//!
//! 备份文件是占位快照：只记录生成时间和各表行数，不含数据本身。

use std::path::{Path, PathBuf};

use chrono::Local;
use shared::models::Backup;
use sqlx::SqlitePool;

use crate::db::repository::backup;
use crate::utils::{AppError, AppResult, ErrorCode};

const SNAPSHOT_TABLES: &[&str] = &["product", "orders", "order_item", "dining_table", "settings"];

/// Downloaded backup content
#[derive(Debug, Clone)]
pub struct BackupFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct BackupService {
    pool: SqlitePool,
    dir: PathBuf,
}

impl BackupService {
    pub fn new(pool: SqlitePool, dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn list(&self) -> AppResult<Vec<Backup>> {
        Ok(backup::find_all(&self.pool).await?)
    }

    /// Write a new snapshot file and record it
    pub async fn create(&self) -> AppResult<Backup> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create backup directory: {e}")))?;

        let now = Local::now();
        let stem = format!("backup-{}", now.format("%Y%m%d-%H%M%S"));
        let (file_name, path) = self.unused_path(&stem).await;

        let content = self.snapshot(&now.to_rfc3339()).await?;
        tokio::fs::write(&path, content.as_bytes())
            .await
            .map_err(|e| AppError::storage(format!("Failed to write backup {file_name}: {e}")))?;

        let record = backup::insert(
            &self.pool,
            &file_name,
            &path.to_string_lossy(),
            content.len() as i64,
        )
        .await;
        match record {
            Ok(record) => {
                tracing::info!(backup_id = record.id, file = %file_name, size = record.size, "Backup created");
                Ok(record)
            }
            Err(e) => {
                // keep disk and records in sync
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(file = %file_name, "Failed to remove orphan backup file: {rm}");
                }
                Err(e.into())
            }
        }
    }

    pub async fn download(&self, id: i64) -> AppResult<BackupFile> {
        let record = self.find(id).await?;
        match tokio::fs::read(&record.file_path).await {
            Ok(content) => Ok(BackupFile {
                file_name: record.file_name,
                content,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::with_message(
                ErrorCode::BackupFileMissing,
                format!("Backup file {} no longer exists", record.file_name),
            )
            .with_detail("backup_id", id)),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read backup {}: {e}",
                record.file_name
            ))),
        }
    }

    /// Remove the file (if still present) and the record
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let record = self.find(id).await?;
        match tokio::fs::remove_file(&record.file_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(backup_id = id, file = %record.file_name, "Backup file already gone");
            }
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to delete backup {}: {e}",
                    record.file_name
                )));
            }
        }
        backup::delete(&self.pool, id).await?;
        tracing::info!(backup_id = id, file = %record.file_name, "Backup deleted");
        Ok(())
    }

    async fn find(&self, id: i64) -> AppResult<Backup> {
        backup::find_by_id(&self.pool, id).await?.ok_or_else(|| {
            AppError::with_message(ErrorCode::BackupNotFound, format!("Backup {id} not found"))
                .with_detail("backup_id", id)
        })
    }

    /// `stem.sql`, or `stem-N.sql` when a backup was already taken this second
    async fn unused_path(&self, stem: &str) -> (String, PathBuf) {
        let mut file_name = format!("{stem}.sql");
        let mut n = 1;
        while tokio::fs::try_exists(self.dir.join(&file_name))
            .await
            .unwrap_or(false)
        {
            file_name = format!("{stem}-{n}.sql");
            n += 1;
        }
        let path = self.dir.join(&file_name);
        (file_name, path)
    }

    async fn snapshot(&self, generated_at: &str) -> AppResult<String> {
        let mut content = format!("-- POS database snapshot\n-- Generated at: {generated_at}\n\n");
        for table in SNAPSHOT_TABLES {
            let rows = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(e.to_string()))?;
            content.push_str(&format!("-- {table}: {rows} rows\n"));
        }
        Ok(content)
    }
}
