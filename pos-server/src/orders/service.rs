//! 订单生命周期服务
//!
//! 每个操作一个 SQLite 事务：校验 → 写入 → 重算合计 → 提交 → 通知显示端。
//! 任何校验失败都在写入前返回，事务随 drop 回滚。

use serde::Serialize;
use shared::message::{ChangeAction, DisplayMessage, OrderChange};
use shared::models::{
    Order, OrderCreate, OrderDetail, OrderItem, OrderItemInput, OrderStatus,
};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

use super::error::{OrderError, OrderResult};
use super::kitchen::completion_percentage;
use super::status::{ensure_open, ensure_transition};
use crate::db::begin_write;
use crate::db::repository::order_item::NewOrderItem;
use crate::db::repository::{dining_table, order, order_item, product};
use crate::message::NotificationBus;
use crate::utils::money;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_QUANTITY};

/// Result of a readiness toggle
#[derive(Debug, Clone, Serialize)]
pub struct ItemToggle {
    pub item: OrderItem,
    pub order_status: OrderStatus,
    pub progress: i32,
    pub all_ready: bool,
}

/// Order lifecycle service
///
/// Holds the pool and the notification bus; cheap to clone.
#[derive(Debug, Clone)]
pub struct OrderService {
    pool: SqlitePool,
    bus: NotificationBus,
}

impl OrderService {
    pub fn new(pool: SqlitePool, bus: NotificationBus) -> Self {
        Self { pool, bus }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn get(&self, order_id: i64) -> OrderResult<OrderDetail> {
        let mut conn = self.pool.acquire().await?;
        load_detail(&mut conn, order_id).await
    }

    /// Non-terminal orders with their items, oldest first
    pub async fn list_active(&self) -> OrderResult<Vec<OrderDetail>> {
        let mut tx = self.pool.begin().await?;
        let orders = order::find_active(&mut *tx).await?;
        let mut details = Vec::with_capacity(orders.len());
        for o in orders {
            details.push(detail_of(&mut tx, o).await?);
        }
        tx.commit().await?;
        Ok(details)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Open an order on a free table
    pub async fn create(&self, data: OrderCreate) -> OrderResult<OrderDetail> {
        let notes = normalize_notes(data.notes.as_deref())?;
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;

        let table = dining_table::find_by_number(&mut *tx, data.table_number)
            .await?
            .ok_or(OrderError::TableNotFound(data.table_number))?;
        if table.is_occupied {
            return Err(OrderError::TableOccupied(table.number));
        }

        let status = if data.draft {
            OrderStatus::Draft
        } else {
            OrderStatus::Pending
        };
        let order_id = order::insert(&mut tx, table.number, status, notes.as_deref(), now).await?;
        if !dining_table::occupy(&mut tx, table.number, order_id).await? {
            return Err(OrderError::TableOccupied(table.number));
        }

        let created = load_order(&mut tx, order_id).await?;
        for input in &data.items {
            add_line(&mut tx, &created, input, now).await?;
        }
        recompute_total(&mut tx, order_id, now).await?;
        let detail = load_detail(&mut tx, order_id).await?;
        tx.commit().await?;

        tracing::info!(
            order_id,
            table_number = table.number,
            status = %status,
            items = detail.items.len(),
            "Order created"
        );
        self.notify(&detail.order, ChangeAction::Created, None);
        Ok(detail)
    }

    /// draft → pending
    pub async fn submit(&self, order_id: i64) -> OrderResult<OrderDetail> {
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let current = load_order(&mut tx, order_id).await?;
        ensure_transition(current.status, OrderStatus::Pending)?;

        order::update_status(&mut tx, order_id, OrderStatus::Pending, now).await?;
        let detail = load_detail(&mut tx, order_id).await?;
        tx.commit().await?;

        tracing::info!(order_id, "Order submitted");
        self.notify(&detail.order, ChangeAction::Submitted, None);
        Ok(detail)
    }

    pub async fn add_item(&self, order_id: i64, input: OrderItemInput) -> OrderResult<OrderDetail> {
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let current = load_order(&mut tx, order_id).await?;
        ensure_open(&current)?;

        let item_id = add_line(&mut tx, &current, &input, now).await?;
        recompute_total(&mut tx, order_id, now).await?;
        let detail = load_detail(&mut tx, order_id).await?;
        tx.commit().await?;

        tracing::debug!(order_id, item_id, product_id = input.product_id, "Item added");
        self.notify(&detail.order, ChangeAction::ItemAdded, Some(item_id));
        Ok(detail)
    }

    /// Set a line's quantity; 0 removes the line
    pub async fn update_item_quantity(&self, item_id: i64, quantity: i32) -> OrderResult<OrderDetail> {
        if quantity < 0 {
            return Err(OrderError::InvalidInput(format!(
                "quantity must not be negative: {quantity}"
            )));
        }
        if quantity > MAX_QUANTITY {
            return Err(OrderError::InvalidInput(format!(
                "quantity exceeds {MAX_QUANTITY}"
            )));
        }

        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let item = order_item::find_by_id(&mut *tx, item_id)
            .await?
            .ok_or(OrderError::ItemNotFound(item_id))?;
        let current = load_order(&mut tx, item.order_id).await?;
        ensure_open(&current)?;

        let action = if quantity == 0 {
            order_item::delete(&mut tx, item_id).await?;
            ChangeAction::ItemRemoved
        } else {
            order_item::set_quantity(&mut tx, item_id, quantity, now).await?;
            ChangeAction::ItemUpdated
        };
        recompute_total(&mut tx, current.id, now).await?;
        let detail = load_detail(&mut tx, current.id).await?;
        tx.commit().await?;

        self.notify(&detail.order, action, Some(item_id));
        Ok(detail)
    }

    pub async fn remove_item(&self, order_id: i64, item_id: i64) -> OrderResult<OrderDetail> {
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let current = load_order(&mut tx, order_id).await?;
        let item = order_item::find_by_id(&mut *tx, item_id)
            .await?
            .ok_or(OrderError::ItemNotFound(item_id))?;
        if item.order_id != order_id {
            return Err(OrderError::ItemNotInOrder { order_id, item_id });
        }
        ensure_open(&current)?;

        order_item::delete(&mut tx, item_id).await?;
        recompute_total(&mut tx, order_id, now).await?;
        let detail = load_detail(&mut tx, order_id).await?;
        tx.commit().await?;

        self.notify(&detail.order, ChangeAction::ItemRemoved, Some(item_id));
        Ok(detail)
    }

    pub async fn update_notes(&self, order_id: i64, notes: Option<&str>) -> OrderResult<Order> {
        let notes = normalize_notes(notes)?;
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let current = load_order(&mut tx, order_id).await?;
        ensure_open(&current)?;

        order::set_notes(&mut tx, order_id, notes.as_deref(), now).await?;
        let updated = load_order(&mut tx, order_id).await?;
        tx.commit().await?;

        self.notify(&updated, ChangeAction::NotesUpdated, None);
        Ok(updated)
    }

    /// pending → in_progress, starting the cooking clock on every line
    pub async fn send_to_kitchen(&self, order_id: i64) -> OrderResult<OrderDetail> {
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let current = load_order(&mut tx, order_id).await?;
        ensure_transition(current.status, OrderStatus::InProgress)?;

        order::update_status(&mut tx, order_id, OrderStatus::InProgress, now).await?;
        order::mark_sent_to_kitchen(&mut tx, order_id, now).await?;
        let started = order_item::start_cooking(&mut tx, order_id, now).await?;
        let detail = load_detail(&mut tx, order_id).await?;
        tx.commit().await?;

        tracing::info!(order_id, items_started = started, "Order sent to kitchen");
        self.notify(&detail.order, ChangeAction::SentToKitchen, None);
        Ok(detail)
    }

    /// Flip one line between ready and not ready
    pub async fn toggle_item(&self, item_id: i64) -> OrderResult<ItemToggle> {
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let item = order_item::find_by_id(&mut *tx, item_id)
            .await?
            .ok_or(OrderError::ItemNotFound(item_id))?;
        let current = load_order(&mut tx, item.order_id).await?;
        ensure_open(&current)?;
        if current.status == OrderStatus::Draft {
            return Err(OrderError::InvalidTransition {
                from: OrderStatus::Draft,
                to: OrderStatus::InProgress,
            });
        }

        if item.is_ready {
            order_item::mark_not_ready(&mut tx, item_id, now).await?;
        } else {
            order_item::mark_ready(&mut tx, item_id, now).await?;
        }

        let mut status = current.status;
        if status == OrderStatus::Pending {
            ensure_transition(status, OrderStatus::InProgress)?;
            order::update_status(&mut tx, current.id, OrderStatus::InProgress, now).await?;
            status = OrderStatus::InProgress;
        }

        let (ready, total) = order_item::readiness(&mut *tx, current.id).await?;
        let all_ready = total > 0 && ready == total;
        if all_ready {
            order::mark_cooking_completed(&mut tx, current.id, now).await?;
        }

        let item = order_item::find_by_id(&mut *tx, item_id)
            .await?
            .ok_or(OrderError::ItemNotFound(item_id))?;
        let updated = load_order(&mut tx, current.id).await?;
        tx.commit().await?;

        tracing::debug!(order_id = current.id, item_id, ready = item.is_ready, "Item toggled");
        let action = if all_ready {
            ChangeAction::AllReady
        } else {
            ChangeAction::ItemToggled
        };
        self.notify(&updated, action, Some(item_id));

        Ok(ItemToggle {
            item,
            order_status: status,
            progress: completion_percentage(ready.max(0) as usize, total.max(0) as usize),
            all_ready,
        })
    }

    /// in_progress → completed; unready lines are forced ready, table released
    pub async fn complete(&self, order_id: i64) -> OrderResult<OrderDetail> {
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let current = load_order(&mut tx, order_id).await?;
        ensure_transition(current.status, OrderStatus::Completed)?;

        let forced = order_item::mark_all_ready(&mut tx, order_id, now).await?;
        order::mark_completed(&mut tx, order_id, now).await?;
        let released = dining_table::release_by_order(&mut tx, order_id).await?;
        let detail = load_detail(&mut tx, order_id).await?;
        tx.commit().await?;

        tracing::info!(
            order_id,
            table_number = current.table_number,
            total = detail.order.total,
            forced_ready = forced,
            "Order completed"
        );
        if released == 0 {
            tracing::warn!(order_id, "Completed order held no table");
        }
        self.notify(&detail.order, ChangeAction::Completed, None);
        Ok(detail)
    }

    /// Any open status → cancelled, table released
    pub async fn cancel(&self, order_id: i64) -> OrderResult<OrderDetail> {
        let now = now_millis();
        let mut tx = begin_write(&self.pool).await?;
        let current = load_order(&mut tx, order_id).await?;
        ensure_transition(current.status, OrderStatus::Cancelled)?;

        order::update_status(&mut tx, order_id, OrderStatus::Cancelled, now).await?;
        dining_table::release_by_order(&mut tx, order_id).await?;
        let detail = load_detail(&mut tx, order_id).await?;
        tx.commit().await?;

        tracing::info!(order_id, table_number = current.table_number, "Order cancelled");
        self.notify(&detail.order, ChangeAction::Cancelled, None);
        Ok(detail)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Fan out a committed change
    ///
    /// Front-of-house displays see every change; the kitchen sees changes to
    /// orders on its queue and the moment they leave it.
    fn notify(&self, order: &Order, action: ChangeAction, item_id: Option<i64>) {
        let mut change = OrderChange::new(action, order.id, order.table_number, order.status);
        if let Some(item_id) = item_id {
            change = change.with_item(item_id);
        }

        self.bus.publish(DisplayMessage::order_update(&change));
        if order.status.is_kitchen_visible()
            || matches!(action, ChangeAction::Completed | ChangeAction::Cancelled)
        {
            self.bus.publish(DisplayMessage::kitchen_update(&change));
        }
    }
}

// ============================================================================
// Helpers (run inside the caller's transaction)
// ============================================================================

async fn load_order(conn: &mut SqliteConnection, order_id: i64) -> OrderResult<Order> {
    order::find_by_id(&mut *conn, order_id)
        .await?
        .ok_or(OrderError::OrderNotFound(order_id))
}

async fn load_detail(conn: &mut SqliteConnection, order_id: i64) -> OrderResult<OrderDetail> {
    let o = load_order(conn, order_id).await?;
    detail_of(conn, o).await
}

async fn detail_of(conn: &mut SqliteConnection, o: Order) -> OrderResult<OrderDetail> {
    let items = order_item::find_by_order(&mut *conn, o.id).await?;
    let ready = items.iter().filter(|i| i.is_ready).count();
    Ok(OrderDetail {
        progress: completion_percentage(ready, items.len()),
        order: o,
        items,
    })
}

/// Σ(quantity × unit_price) over the current lines, clamped at zero
async fn recompute_total(conn: &mut SqliteConnection, order_id: i64, now: i64) -> OrderResult<f64> {
    let lines = order_item::price_lines(&mut *conn, order_id).await?;
    let total = money::order_total(lines);
    order::set_total(conn, order_id, total, now).await?;
    Ok(total)
}

/// Merge into a matching line or insert a new one; returns the line id
async fn add_line(
    conn: &mut SqliteConnection,
    current: &Order,
    input: &OrderItemInput,
    now: i64,
) -> OrderResult<i64> {
    let quantity = match input.quantity {
        Some(q) if q > 0 => q,
        _ => 1,
    };
    if quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidInput(format!(
            "quantity exceeds {MAX_QUANTITY}"
        )));
    }
    let notes = input.notes.as_deref().map(str::trim).unwrap_or_default();
    if notes.chars().count() > MAX_NOTE_LEN {
        return Err(OrderError::InvalidInput(format!(
            "item notes exceed {MAX_NOTE_LEN} characters"
        )));
    }

    let product = product::find_by_id(&mut *conn, input.product_id)
        .await?
        .ok_or(OrderError::ProductNotFound(input.product_id))?;
    if !product.is_available {
        return Err(OrderError::ProductUnavailable(product.name));
    }

    if let Some((line_id, existing)) =
        order_item::find_mergeable(&mut *conn, current.id, product.id, notes, product.price).await?
    {
        let merged = existing.saturating_add(quantity);
        if merged > MAX_QUANTITY {
            return Err(OrderError::InvalidInput(format!(
                "quantity exceeds {MAX_QUANTITY}"
            )));
        }
        order_item::set_quantity(conn, line_id, merged, now).await?;
        return Ok(line_id);
    }

    // lines added while the kitchen is already cooking start their clock now
    let cooking_started_at = (current.status == OrderStatus::InProgress).then_some(now);
    let line_id = order_item::insert(
        conn,
        NewOrderItem {
            order_id: current.id,
            product_id: product.id,
            quantity,
            unit_price: product.price,
            notes,
            cooking_started_at,
        },
        now,
    )
    .await?;
    Ok(line_id)
}

/// Trim notes; blank becomes `None`
fn normalize_notes(notes: Option<&str>) -> OrderResult<Option<String>> {
    let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if notes.chars().count() > MAX_NOTE_LEN {
        return Err(OrderError::InvalidInput(format!(
            "notes exceed {MAX_NOTE_LEN} characters"
        )));
    }
    Ok(Some(notes.to_string()))
}
