//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// `is_occupied` and `order_id` always change together: a table is occupied
/// exactly while it points at a non-terminal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub number: i32,
    pub capacity: i32,
    pub is_occupied: bool,
    pub order_id: Option<i64>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub number: i32,
    pub capacity: Option<i32>,
}
