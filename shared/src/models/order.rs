//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status
///
/// `draft` → `pending` → `in_progress` → `completed`, with `cancelled`
/// reachable from every non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Draft,
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled orders never change again
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Statuses shown on the kitchen view
    pub const fn is_kitchen_visible(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// Order entity (header row)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub table_number: i32,
    pub status: OrderStatus,
    /// Σ(quantity × unit_price), recomputed on every item mutation
    pub total: f64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub sent_to_kitchen_at: Option<i64>,
    pub cooking_completed_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub completed_at: Option<i64>,
}

/// Order line item, joined with its product's name and category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub category: String,
    pub quantity: i32,
    /// Product price captured when the line was added
    pub unit_price: f64,
    pub notes: String,
    pub is_ready: bool,
    pub cooking_started_at: Option<i64>,
    pub cooking_finished_at: Option<i64>,
    pub cooking_seconds: Option<i64>,
    pub delivered_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order with its line items and kitchen progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    /// Ready items / total items × 100, truncated
    pub progress: i32,
}

/// Line item input for order creation and add-item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    /// Missing or non-positive defaults to 1
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_number: i32,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    pub notes: Option<String>,
    /// Open the order as a draft instead of sending it straight to `pending`
    #[serde(default)]
    pub draft: bool,
}

/// Update line item quantity payload (0 removes the line)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemUpdate {
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderNotesUpdate {
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_str() {
        for status in [
            OrderStatus::Draft,
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("served".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serde_matches_as_str() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_terminal_and_kitchen_visibility() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Draft.is_terminal());

        assert!(OrderStatus::Pending.is_kitchen_visible());
        assert!(OrderStatus::InProgress.is_kitchen_visible());
        assert!(!OrderStatus::Draft.is_kitchen_visible());
        assert!(!OrderStatus::Completed.is_kitchen_visible());
    }

    #[test]
    fn test_order_create_defaults() {
        let create: OrderCreate = serde_json::from_str(r#"{"table_number": 3}"#).unwrap();
        assert_eq!(create.table_number, 3);
        assert!(create.items.is_empty());
        assert!(!create.draft);
    }
}
