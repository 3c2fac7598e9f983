use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;

// ==================== Order Change ====================

/// 订单变化动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Submitted,
    ItemAdded,
    ItemUpdated,
    ItemRemoved,
    NotesUpdated,
    SentToKitchen,
    ItemToggled,
    AllReady,
    Completed,
    Cancelled,
}

/// 订单变化载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderChange {
    pub action: ChangeAction,
    pub order_id: i64,
    pub table_number: i32,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
}

impl OrderChange {
    pub fn new(action: ChangeAction, order_id: i64, table_number: i32, status: OrderStatus) -> Self {
        Self {
            action,
            order_id,
            table_number,
            status,
            item_id: None,
        }
    }

    pub fn with_item(mut self, item_id: i64) -> Self {
        self.item_id = Some(item_id);
        self
    }

    /// Serialize into a JSON value; all fields are plain scalars so this cannot fail
    pub fn to_value(&self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "action": self.action,
            "order_id": self.order_id,
            "table_number": self.table_number,
            "status": self.status,
        });
        if let Some(item_id) = self.item_id {
            value["item_id"] = item_id.into();
        }
        value
    }
}
