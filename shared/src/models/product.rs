//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Price in currency unit
    pub price: f64,
    /// Free-text category label
    pub category: String,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub is_available: Option<bool>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

/// Bulk catalog action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Enable,
    Disable,
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductBulkRequest {
    pub ids: Vec<i64>,
    pub action: BulkAction,
}

/// Outcome of deleting a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductRemoval {
    /// Referenced by order items, availability switched off
    Disabled,
    /// Row removed
    Deleted,
}

/// Available products of one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSection {
    pub category: String,
    pub products: Vec<Product>,
}
