//! Order Repository (header rows)

use super::RepoResult;
use serde::Serialize;
use shared::models::{Order, OrderStatus};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, table_number, status, total, notes, created_at, updated_at, \
     sent_to_kitchen_at, cooking_completed_at, delivered_at, completed_at";

pub async fn insert(
    conn: &mut SqliteConnection,
    table_number: i32,
    status: OrderStatus,
    notes: Option<&str>,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (table_number, status, total, notes, created_at, updated_at) \
         VALUES (?1, ?2, 0, ?3, ?4, ?4) RETURNING id",
    )
    .bind(table_number)
    .bind(status)
    .bind(notes)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(order)
}

/// Orders that are neither completed nor cancelled, oldest first
pub async fn find_active(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE status NOT IN ('completed', 'cancelled') \
         ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(ex)
    .await?;
    Ok(orders)
}

/// Orders shown on the kitchen view (`pending`, `in_progress`), oldest first
pub async fn find_for_kitchen(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE status IN ('pending', 'in_progress') \
         ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(ex)
    .await?;
    Ok(orders)
}

/// Completed order summary for history listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CompletedOrderRow {
    pub id: i64,
    pub table_number: i32,
    pub total: f64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub completed_at: Option<i64>,
    pub item_count: i64,
}

/// Completed orders created in `[start, end)`, newest first
pub async fn find_completed_between(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<Vec<CompletedOrderRow>> {
    let rows = sqlx::query_as::<_, CompletedOrderRow>(
        "SELECT o.id, o.table_number, o.total, o.notes, o.created_at, o.completed_at, \
         COALESCE(SUM(oi.quantity), 0) AS item_count \
         FROM orders o LEFT JOIN order_item oi ON oi.order_id = o.id \
         WHERE o.status = 'completed' AND o.created_at >= ? AND o.created_at < ? \
         GROUP BY o.id ORDER BY o.created_at DESC, o.id DESC",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn update_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: OrderStatus,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn set_total(conn: &mut SqliteConnection, id: i64, total: f64, now: i64) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET total = ?, updated_at = ? WHERE id = ?")
        .bind(total)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn set_notes(
    conn: &mut SqliteConnection,
    id: i64,
    notes: Option<&str>,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET notes = ?, updated_at = ? WHERE id = ?")
        .bind(notes)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Stamp `sent_to_kitchen_at` unless already set
pub async fn mark_sent_to_kitchen(conn: &mut SqliteConnection, id: i64, now: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE orders SET sent_to_kitchen_at = COALESCE(sent_to_kitchen_at, ?1), updated_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Stamp `cooking_completed_at` unless already set; never cleared afterwards
pub async fn mark_cooking_completed(
    conn: &mut SqliteConnection,
    id: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE orders SET cooking_completed_at = COALESCE(cooking_completed_at, ?1), updated_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Final milestones for a completed order
pub async fn mark_completed(conn: &mut SqliteConnection, id: i64, now: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE orders SET status = 'completed', completed_at = ?1, \
         cooking_completed_at = COALESCE(cooking_completed_at, ?1), \
         delivered_at = COALESCE(delivered_at, ?1), updated_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn count_by_status(ex: impl SqliteExecutor<'_>, status: OrderStatus) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE status = ?")
        .bind(status)
        .fetch_one(ex)
        .await?;
    Ok(count)
}
