//! Report Queries (dashboard + kitchen statistics)
//!
//! Read-only aggregates. Time bounds are Unix millis, `[start, end)`.

use super::RepoResult;
use serde::Serialize;
use sqlx::SqlitePool;

// ============================================================================
// Dashboard
// ============================================================================

/// Revenue and order counts for a time window
#[derive(Debug, Clone, Default, Serialize, sqlx::FromRow)]
pub struct SalesSummary {
    pub revenue: f64,
    pub completed_orders: i64,
    pub cancelled_orders: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopProduct {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

pub async fn sales_summary(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<SalesSummary> {
    let summary = sqlx::query_as::<_, SalesSummary>(
        "SELECT \
         CAST(COALESCE(SUM(CASE WHEN status = 'completed' THEN total ELSE 0.0 END), 0.0) AS REAL) AS revenue, \
         COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0) AS completed_orders, \
         COALESCE(SUM(CASE WHEN status = 'cancelled' THEN 1 ELSE 0 END), 0) AS cancelled_orders \
         FROM orders WHERE created_at >= ? AND created_at < ?",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(summary)
}

/// Best sellers by quantity among completed orders
pub async fn top_products(
    pool: &SqlitePool,
    start: i64,
    end: i64,
    limit: i64,
) -> RepoResult<Vec<TopProduct>> {
    let products = sqlx::query_as::<_, TopProduct>(
        "SELECT p.id AS product_id, p.name, SUM(oi.quantity) AS quantity, \
         CAST(SUM(oi.quantity * oi.unit_price) AS REAL) AS revenue \
         FROM order_item oi JOIN orders o ON o.id = oi.order_id JOIN product p ON p.id = oi.product_id \
         WHERE o.status = 'completed' AND o.created_at >= ? AND o.created_at < ? \
         GROUP BY p.id ORDER BY quantity DESC, p.name LIMIT ?",
    )
    .bind(start)
    .bind(end)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

// ============================================================================
// Kitchen statistics
// ============================================================================

/// Cooking time aggregate for one product
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductCookingStat {
    pub product_id: i64,
    pub name: String,
    pub category: String,
    pub avg_seconds: f64,
    pub min_seconds: i64,
    pub max_seconds: i64,
    pub samples: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryCookingStat {
    pub category: String,
    pub avg_seconds: f64,
    pub samples: i64,
}

/// Orders per local hour of day
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HourlyStat {
    pub hour: i64,
    pub orders: i64,
    pub avg_seconds: Option<f64>,
}

/// Per-product cooking stats for lines finished since `since`
///
/// `fastest_first` picks the ordering; at most `limit` rows.
pub async fn product_cooking_stats(
    pool: &SqlitePool,
    since: i64,
    fastest_first: bool,
    limit: i64,
) -> RepoResult<Vec<ProductCookingStat>> {
    let order = if fastest_first { "ASC" } else { "DESC" };
    let stats = sqlx::query_as::<_, ProductCookingStat>(&format!(
        "SELECT p.id AS product_id, p.name, p.category, \
         CAST(AVG(oi.cooking_seconds) AS REAL) AS avg_seconds, \
         MIN(oi.cooking_seconds) AS min_seconds, MAX(oi.cooking_seconds) AS max_seconds, \
         COUNT(*) AS samples \
         FROM order_item oi JOIN product p ON p.id = oi.product_id \
         WHERE oi.cooking_seconds IS NOT NULL AND oi.cooking_finished_at >= ? \
         GROUP BY p.id ORDER BY avg_seconds {order}, p.name LIMIT ?"
    ))
    .bind(since)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

pub async fn category_cooking_stats(
    pool: &SqlitePool,
    since: i64,
) -> RepoResult<Vec<CategoryCookingStat>> {
    let stats = sqlx::query_as::<_, CategoryCookingStat>(
        "SELECT p.category, CAST(AVG(oi.cooking_seconds) AS REAL) AS avg_seconds, COUNT(*) AS samples \
         FROM order_item oi JOIN product p ON p.id = oi.product_id \
         WHERE oi.cooking_seconds IS NOT NULL AND oi.cooking_finished_at >= ? \
         GROUP BY p.category ORDER BY avg_seconds ASC",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

pub async fn hourly_stats(pool: &SqlitePool, since: i64) -> RepoResult<Vec<HourlyStat>> {
    let stats = sqlx::query_as::<_, HourlyStat>(
        "SELECT CAST(strftime('%H', o.created_at / 1000, 'unixepoch', 'localtime') AS INTEGER) AS hour, \
         COUNT(DISTINCT o.id) AS orders, CAST(AVG(oi.cooking_seconds) AS REAL) AS avg_seconds \
         FROM orders o LEFT JOIN order_item oi ON oi.order_id = o.id \
         WHERE o.created_at >= ? AND o.status != 'cancelled' \
         GROUP BY hour ORDER BY hour",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn seed(pool: &SqlitePool) {
        sqlx::query(
            "INSERT INTO product (id, name, price, category, created_at, updated_at) VALUES \
             (1, 'Pizza Margarita', 12.00, 'Pizzas', 0, 0), \
             (2, 'Ensalada César', 6.50, 'Ensaladas', 0, 0)",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO orders (id, table_number, status, total, created_at, updated_at) VALUES \
             (1, 1, 'completed', 30.50, 1000, 1000), \
             (2, 2, 'cancelled', 0, 2000, 2000), \
             (3, 3, 'completed', 12.00, 999999, 999999)",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO order_item (order_id, product_id, quantity, unit_price, is_ready, \
             cooking_started_at, cooking_finished_at, cooking_seconds, created_at, updated_at) VALUES \
             (1, 1, 2, 12.00, 1, 1000, 601000, 600, 1000, 1000), \
             (1, 2, 1, 6.50, 1, 1000, 121000, 120, 1000, 1000), \
             (3, 1, 1, 12.00, 1, 1000, 301000, 300, 1000, 1000)",
        )
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_sales_summary_window() {
        let db = DbService::in_memory().await.unwrap();
        seed(&db.pool).await;

        let summary = sales_summary(&db.pool, 0, 10_000).await.unwrap();
        assert_eq!(summary.revenue, 30.50);
        assert_eq!(summary.completed_orders, 1);
        assert_eq!(summary.cancelled_orders, 1);

        let top = top_products(&db.pool, 0, 10_000, 5).await.unwrap();
        assert_eq!(top[0].name, "Pizza Margarita");
        assert_eq!(top[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_cooking_stats() {
        let db = DbService::in_memory().await.unwrap();
        seed(&db.pool).await;

        let fastest = product_cooking_stats(&db.pool, 0, true, 10).await.unwrap();
        assert_eq!(fastest[0].name, "Ensalada César");
        assert_eq!(fastest[1].avg_seconds, 450.0);
        assert_eq!(fastest[1].min_seconds, 300);
        assert_eq!(fastest[1].max_seconds, 600);
        assert_eq!(fastest[1].samples, 2);

        let slowest = product_cooking_stats(&db.pool, 0, false, 1).await.unwrap();
        assert_eq!(slowest.len(), 1);
        assert_eq!(slowest[0].name, "Pizza Margarita");

        let categories = category_cooking_stats(&db.pool, 0).await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].category, "Ensaladas");

        let hourly = hourly_stats(&db.pool, 0).await.unwrap();
        assert_eq!(hourly.iter().map(|h| h.orders).sum::<i64>(), 2);
    }
}
