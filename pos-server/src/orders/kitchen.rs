//! 厨房视图
//!
//! Projection of `pending` + `in_progress` orders, oldest first. Rebuilt from
//! the store on every read.

use serde::Serialize;
use shared::models::{Order, OrderItem};
use shared::util::{elapsed_seconds, now_millis};
use sqlx::SqlitePool;

use super::error::{OrderError, OrderResult};
use crate::db::repository::{order, order_item, report};

/// Ready items / total items × 100, truncated; 0 for an empty order
pub fn completion_percentage(ready: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    (ready.min(total) * 100 / total) as i32
}

/// Item as shown on a kitchen ticket
#[derive(Debug, Clone, Serialize)]
pub struct KitchenItem {
    #[serde(flatten)]
    pub item: OrderItem,
    /// Final duration when ready, running time while cooking
    pub elapsed_seconds: Option<i64>,
}

impl KitchenItem {
    fn new(item: OrderItem, now: i64) -> Self {
        let elapsed_seconds = if item.is_ready {
            item.cooking_seconds
        } else {
            item.cooking_started_at.map(|start| elapsed_seconds(start, now))
        };
        Self {
            item,
            elapsed_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KitchenTicket {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<KitchenItem>,
    pub ready_items: usize,
    pub progress: i32,
    /// Since the order reached the kitchen (or was created, if never sent)
    pub waiting_seconds: i64,
}

/// Current kitchen queue
pub async fn kitchen_view(pool: &SqlitePool) -> OrderResult<Vec<KitchenTicket>> {
    let now = now_millis();
    // one read transaction so orders and items come from the same snapshot
    let mut tx = pool.begin().await?;
    let orders = order::find_for_kitchen(&mut *tx).await?;

    let mut tickets = Vec::with_capacity(orders.len());
    for order in orders {
        let items = order_item::find_by_order(&mut *tx, order.id).await?;
        let ready_items = items.iter().filter(|i| i.is_ready).count();
        let progress = completion_percentage(ready_items, items.len());
        let waiting_since = order.sent_to_kitchen_at.unwrap_or(order.created_at);
        tickets.push(KitchenTicket {
            waiting_seconds: elapsed_seconds(waiting_since, now),
            items: items.into_iter().map(|i| KitchenItem::new(i, now)).collect(),
            ready_items,
            progress,
            order,
        });
    }
    tx.commit().await?;
    Ok(tickets)
}

/// Readiness of one order
#[derive(Debug, Clone, Serialize)]
pub struct CompletionStatus {
    pub order_id: i64,
    pub total_items: i64,
    pub ready_items: i64,
    pub percentage: i32,
    pub all_ready: bool,
    pub cooking_completed_at: Option<i64>,
}

pub async fn completion_status(pool: &SqlitePool, order_id: i64) -> OrderResult<CompletionStatus> {
    let order = order::find_by_id(pool, order_id)
        .await?
        .ok_or(OrderError::OrderNotFound(order_id))?;
    let (ready, total) = order_item::readiness(pool, order_id).await?;
    Ok(CompletionStatus {
        order_id,
        total_items: total,
        ready_items: ready,
        percentage: completion_percentage(ready.max(0) as usize, total.max(0) as usize),
        all_ready: total > 0 && ready == total,
        cooking_completed_at: order.cooking_completed_at,
    })
}

// ============================================================================
// Statistics
// ============================================================================

pub const DEFAULT_STATS_DAYS: i64 = 30;
/// 统计窗口上限 (约十年)
pub const MAX_STATS_DAYS: i64 = 3650;
const STATS_TOP_N: i64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct KitchenStats {
    pub days: i64,
    pub since: i64,
    pub fastest_products: Vec<report::ProductCookingStat>,
    pub slowest_products: Vec<report::ProductCookingStat>,
    pub categories: Vec<report::CategoryCookingStat>,
    pub hourly: Vec<report::HourlyStat>,
}

/// Cooking statistics over the last `days` days
pub async fn kitchen_stats(pool: &SqlitePool, days: i64) -> OrderResult<KitchenStats> {
    if !(1..=MAX_STATS_DAYS).contains(&days) {
        return Err(OrderError::InvalidInput(format!(
            "days must be between 1 and {MAX_STATS_DAYS}, got {days}"
        )));
    }
    let since = now_millis() - days * 24 * 60 * 60 * 1000;

    Ok(KitchenStats {
        days,
        since,
        fastest_products: report::product_cooking_stats(pool, since, true, STATS_TOP_N).await?,
        slowest_products: report::product_cooking_stats(pool, since, false, STATS_TOP_N).await?,
        categories: report::category_cooking_stats(pool, since).await?,
        hourly: report::hourly_stats(pool, since).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_kitchen_stats_days_bounds() {
        let db = DbService::in_memory().await.unwrap();
        for days in [0, -1, MAX_STATS_DAYS + 1, 200_000_000_000, i64::MAX] {
            assert!(
                matches!(kitchen_stats(&db.pool, days).await, Err(OrderError::InvalidInput(_))),
                "days={days}"
            );
        }

        let stats = kitchen_stats(&db.pool, MAX_STATS_DAYS).await.unwrap();
        assert_eq!(stats.days, MAX_STATS_DAYS);
        assert!(stats.fastest_products.is_empty());
    }

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(2, 4), 50);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 66);
        assert_eq!(completion_percentage(3, 3), 100);
        // clamped
        assert_eq!(completion_percentage(5, 3), 100);
    }

    fn item(is_ready: bool, started: Option<i64>, seconds: Option<i64>) -> OrderItem {
        OrderItem {
            id: 1,
            order_id: 1,
            product_id: 1,
            product_name: "Papas Fritas".into(),
            category: "Acompañamientos".into(),
            quantity: 1,
            unit_price: 3.99,
            notes: String::new(),
            is_ready,
            cooking_started_at: started,
            cooking_finished_at: None,
            cooking_seconds: seconds,
            delivered_at: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_kitchen_item_elapsed() {
        assert_eq!(KitchenItem::new(item(false, Some(1_000), None), 91_000).elapsed_seconds, Some(90));
        assert_eq!(KitchenItem::new(item(true, Some(1_000), Some(42)), 91_000).elapsed_seconds, Some(42));
        assert_eq!(KitchenItem::new(item(false, None, None), 91_000).elapsed_seconds, None);
    }
}
