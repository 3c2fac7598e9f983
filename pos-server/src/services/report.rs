//! Report Service - 经营概览与历史订单

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::OrderStatus;
use sqlx::SqlitePool;

use crate::db::repository::order::CompletedOrderRow;
use crate::db::repository::report::{SalesSummary, TopProduct};
use crate::db::repository::{dining_table, order, report};
use crate::utils::AppResult;
use crate::utils::money;
use crate::utils::time::{DateRange, RangeKind, today};

const DASHBOARD_TOP_PRODUCTS: i64 = 5;

/// 今日概览
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub date: String,
    #[serde(flatten)]
    pub sales: SalesSummary,
    pub average_ticket: f64,
    pub active_orders: i64,
    pub occupied_tables: i64,
    pub total_tables: i64,
    pub top_products: Vec<TopProduct>,
}

/// Completed orders in a date range
#[derive(Debug, Clone, Serialize)]
pub struct OrderHistory {
    pub range: DateRange,
    pub orders: Vec<CompletedOrderRow>,
    pub order_count: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone)]
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn dashboard(&self) -> AppResult<Dashboard> {
        let range = DateRange::resolve(RangeKind::Today, None, None, today())?;
        let (start, end) = (range.start_millis(), range.end_millis());

        let sales = report::sales_summary(&self.pool, start, end).await?;
        let top_products =
            report::top_products(&self.pool, start, end, DASHBOARD_TOP_PRODUCTS).await?;
        let active_orders = order::count_by_status(&self.pool, OrderStatus::Draft).await?
            + order::count_by_status(&self.pool, OrderStatus::Pending).await?
            + order::count_by_status(&self.pool, OrderStatus::InProgress).await?;
        let tables = dining_table::find_all(&self.pool).await?;
        let occupied_tables = tables.iter().filter(|t| t.is_occupied).count() as i64;

        let average_ticket = if sales.completed_orders > 0 {
            money::to_f64(money::to_decimal(sales.revenue) / Decimal::from(sales.completed_orders))
        } else {
            0.0
        };

        Ok(Dashboard {
            date: range.start_date.to_string(),
            average_ticket,
            sales,
            active_orders,
            occupied_tables,
            total_tables: tables.len() as i64,
            top_products,
        })
    }

    /// Completed orders created inside the range, newest first
    pub async fn history(
        &self,
        kind: RangeKind,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<OrderHistory> {
        let range = DateRange::resolve(kind, start_date, end_date, today())?;
        let orders =
            order::find_completed_between(&self.pool, range.start_millis(), range.end_millis())
                .await?;
        let revenue = money::order_total(orders.iter().map(|o| (1, o.total)));

        Ok(OrderHistory {
            range,
            order_count: orders.len(),
            revenue,
            orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::seed::seed_defaults;

    #[tokio::test]
    async fn test_dashboard_and_history_today() {
        let db = DbService::in_memory().await.unwrap();
        seed_defaults(&db.pool, 4, true).await.unwrap();
        let now = shared::util::now_millis();
        sqlx::query(
            "INSERT INTO orders (table_number, status, total, created_at, updated_at, completed_at) VALUES \
             (1, 'completed', 20.48, ?1, ?1, ?1), (2, 'completed', 9.52, ?1, ?1, ?1), (3, 'cancelled', 0, ?1, ?1, NULL), \
             (4, 'pending', 0, ?1, ?1, NULL)",
        )
        .bind(now)
        .execute(&db.pool)
        .await
        .unwrap();

        let svc = ReportService::new(db.pool.clone());
        let dashboard = svc.dashboard().await.unwrap();
        assert_eq!(dashboard.sales.revenue, 30.0);
        assert_eq!(dashboard.sales.completed_orders, 2);
        assert_eq!(dashboard.sales.cancelled_orders, 1);
        assert_eq!(dashboard.average_ticket, 15.0);
        assert_eq!(dashboard.active_orders, 1);
        assert_eq!(dashboard.total_tables, 4);

        let history = svc.history(RangeKind::Today, None, None).await.unwrap();
        assert_eq!(history.order_count, 2);
        assert_eq!(history.revenue, 30.0);

        let empty = svc
            .history(RangeKind::Custom, Some("2001-01-01"), Some("2001-01-31"))
            .await
            .unwrap();
        assert!(empty.orders.is_empty());
    }
}
