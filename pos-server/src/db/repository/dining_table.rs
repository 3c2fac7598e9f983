//! Dining Table Repository
//!
//! 桌台占用由订单生命周期驱动：开单占用，完成/取消释放。
//! `occupy` 与 `release_by_order` 必须和订单状态变更在同一事务内执行。

use super::{RepoError, RepoResult};
use shared::models::DiningTable;
use sqlx::{SqliteConnection, SqliteExecutor};

const COLUMNS: &str = "id, number, capacity, is_occupied, order_id";

/// Default seats for a table created without capacity
pub const DEFAULT_CAPACITY: i32 = 4;

pub async fn find_all(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table ORDER BY number"
    ))
    .fetch_all(ex)
    .await?;
    Ok(tables)
}

pub async fn find_free(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE is_occupied = 0 ORDER BY number"
    ))
    .fetch_all(ex)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(table)
}

pub async fn find_by_number(
    ex: impl SqliteExecutor<'_>,
    number: i32,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE number = ?"
    ))
    .bind(number)
    .fetch_optional(ex)
    .await?;
    Ok(table)
}

pub async fn create(
    ex: impl SqliteExecutor<'_>,
    number: i32,
    capacity: i32,
) -> RepoResult<DiningTable> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "INSERT INTO dining_table (number, capacity, is_occupied) VALUES (?, ?, 0) RETURNING {COLUMNS}"
    ))
    .bind(number)
    .bind(capacity)
    .fetch_one(ex)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Table {number} already exists")),
        other => other,
    })?;
    Ok(table)
}

pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ? AND is_occupied = 0")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Mark a free table as held by `order_id`
///
/// Returns `false` when the table is missing or already occupied; the
/// `is_occupied = 0` guard makes the check and the write a single statement.
pub async fn occupy(conn: &mut SqliteConnection, number: i32, order_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE dining_table SET is_occupied = 1, order_id = ? WHERE number = ? AND is_occupied = 0",
    )
    .bind(order_id)
    .bind(number)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Free whichever table holds `order_id`
pub async fn release_by_order(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<u64> {
    let rows =
        sqlx::query("UPDATE dining_table SET is_occupied = 0, order_id = NULL WHERE order_id = ?")
            .bind(order_id)
            .execute(&mut *conn)
            .await?;
    Ok(rows.rows_affected())
}

pub async fn count_occupied(ex: impl SqliteExecutor<'_>) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dining_table WHERE is_occupied = 1")
        .fetch_one(ex)
        .await?;
    Ok(count)
}

/// Highest occupied table number, if any table is occupied
pub async fn max_occupied_number(ex: impl SqliteExecutor<'_>) -> RepoResult<Option<i32>> {
    let number =
        sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(number) FROM dining_table WHERE is_occupied = 1")
            .fetch_one(ex)
            .await?;
    Ok(number)
}

/// Remove every free table
pub async fn delete_unoccupied(conn: &mut SqliteConnection) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE is_occupied = 0")
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected())
}

/// Create tables `1..=count` that do not exist yet, with default capacity
pub async fn insert_missing(conn: &mut SqliteConnection, count: i32) -> RepoResult<u64> {
    let mut created = 0;
    for number in 1..=count {
        let rows = sqlx::query(
            "INSERT OR IGNORE INTO dining_table (number, capacity, is_occupied) VALUES (?, ?, 0)",
        )
        .bind(number)
        .bind(DEFAULT_CAPACITY)
        .execute(&mut *conn)
        .await?;
        created += rows.rows_affected();
    }
    Ok(created)
}
