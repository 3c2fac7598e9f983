//! Order Item Repository
//!
//! Items are always read joined with their product so the name and category
//! travel with the line.

use super::RepoResult;
use shared::models::OrderItem;
use sqlx::{SqliteConnection, SqliteExecutor};

const SELECT: &str = "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, p.category, \
     oi.quantity, oi.unit_price, oi.notes, oi.is_ready, oi.cooking_started_at, \
     oi.cooking_finished_at, oi.cooking_seconds, oi.delivered_at, oi.created_at, oi.updated_at \
     FROM order_item oi JOIN product p ON p.id = oi.product_id";

pub async fn find_by_order(ex: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "{SELECT} WHERE oi.order_id = ? ORDER BY oi.created_at, oi.id"
    ))
    .bind(order_id)
    .fetch_all(ex)
    .await?;
    Ok(items)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<OrderItem>> {
    let item = sqlx::query_as::<_, OrderItem>(&format!("{SELECT} WHERE oi.id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(item)
}

/// Line that a new add of the same product should merge into
///
/// Same product, same notes, same snapshot price, not yet ready.
pub async fn find_mergeable(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    product_id: i64,
    notes: &str,
    unit_price: f64,
) -> RepoResult<Option<(i64, i32)>> {
    let line = sqlx::query_as::<_, (i64, i32)>(
        "SELECT id, quantity FROM order_item \
         WHERE order_id = ? AND product_id = ? AND notes = ? AND unit_price = ? AND is_ready = 0 \
         ORDER BY id LIMIT 1",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(notes)
    .bind(unit_price)
    .fetch_optional(ex)
    .await?;
    Ok(line)
}

/// New line item fields
#[derive(Debug, Clone)]
pub struct NewOrderItem<'a> {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
    pub notes: &'a str,
    /// Set when the order is already in the kitchen
    pub cooking_started_at: Option<i64>,
}

pub async fn insert(conn: &mut SqliteConnection, item: NewOrderItem<'_>, now: i64) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO order_item (order_id, product_id, quantity, unit_price, notes, is_ready, \
         cooking_started_at, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7, ?7) RETURNING id",
    )
    .bind(item.order_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(item.notes)
    .bind(item.cooking_started_at)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn set_quantity(conn: &mut SqliteConnection, id: i64, quantity: i32, now: i64) -> RepoResult<()> {
    sqlx::query("UPDATE order_item SET quantity = ?, updated_at = ? WHERE id = ?")
        .bind(quantity)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM order_item WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// `(quantity, unit_price)` of every line, for total recomputation
pub async fn price_lines(ex: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<Vec<(i32, f64)>> {
    let lines = sqlx::query_as::<_, (i32, f64)>(
        "SELECT quantity, unit_price FROM order_item WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_all(ex)
    .await?;
    Ok(lines)
}

/// `(ready, total)` item counts
pub async fn readiness(ex: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<(i64, i64)> {
    let counts = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COALESCE(SUM(is_ready), 0), COUNT(*) FROM order_item WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_one(ex)
    .await?;
    Ok(counts)
}

/// Stamp cooking start on every line that has none
pub async fn start_cooking(conn: &mut SqliteConnection, order_id: i64, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE order_item SET cooking_started_at = ?1, updated_at = ?1 \
         WHERE order_id = ?2 AND cooking_started_at IS NULL",
    )
    .bind(now)
    .bind(order_id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected())
}

/// Mark one line ready
///
/// A missing start is backfilled with `now` (duration 0). Delivered is kept
/// when already set.
pub async fn mark_ready(conn: &mut SqliteConnection, id: i64, now: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE order_item SET is_ready = 1, \
         cooking_started_at = COALESCE(cooking_started_at, ?1), \
         cooking_finished_at = ?1, \
         cooking_seconds = MAX(0, (?1 - COALESCE(cooking_started_at, ?1)) / 1000), \
         delivered_at = COALESCE(delivered_at, ?1), updated_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Force every unready line of an order ready, see [`mark_ready`]
pub async fn mark_all_ready(conn: &mut SqliteConnection, order_id: i64, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE order_item SET is_ready = 1, \
         cooking_started_at = COALESCE(cooking_started_at, ?1), \
         cooking_finished_at = ?1, \
         cooking_seconds = MAX(0, (?1 - COALESCE(cooking_started_at, ?1)) / 1000), \
         delivered_at = COALESCE(delivered_at, ?1), updated_at = ?1 \
         WHERE order_id = ?2 AND is_ready = 0",
    )
    .bind(now)
    .bind(order_id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected())
}

/// Mark one line not ready, keeping the finished sample in `cooking_history`
pub async fn mark_not_ready(conn: &mut SqliteConnection, id: i64, now: i64) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO cooking_history (order_item_id, cooking_started_at, cooking_finished_at, cooking_seconds, reverted_at) \
         SELECT id, cooking_started_at, cooking_finished_at, cooking_seconds, ?1 FROM order_item \
         WHERE id = ?2 AND cooking_started_at IS NOT NULL AND cooking_finished_at IS NOT NULL \
         AND cooking_seconds IS NOT NULL",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        "UPDATE order_item SET is_ready = 0, cooking_finished_at = NULL, cooking_seconds = NULL, \
         delivered_at = NULL, updated_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn count_history(ex: impl SqliteExecutor<'_>, item_id: i64) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cooking_history WHERE order_item_id = ?")
            .bind(item_id)
            .fetch_one(ex)
            .await?;
    Ok(count)
}
