//! Backup Repository

use super::RepoResult;
use shared::models::Backup;
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, file_name, file_path, size, created_at";

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    file_name: &str,
    file_path: &str,
    size: i64,
) -> RepoResult<Backup> {
    let backup = sqlx::query_as::<_, Backup>(&format!(
        "INSERT INTO backup (file_name, file_path, size, created_at) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(file_name)
    .bind(file_path)
    .bind(size)
    .bind(shared::util::now_millis())
    .fetch_one(ex)
    .await?;
    Ok(backup)
}

/// Newest first
pub async fn find_all(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<Backup>> {
    let backups = sqlx::query_as::<_, Backup>(&format!(
        "SELECT {COLUMNS} FROM backup ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(ex)
    .await?;
    Ok(backups)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Backup>> {
    let backup = sqlx::query_as::<_, Backup>(&format!("SELECT {COLUMNS} FROM backup WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(backup)
}

pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM backup WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}
