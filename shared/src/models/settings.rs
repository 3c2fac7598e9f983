//! Settings Model (singleton row, id = 1)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Settings {
    pub id: i64,
    // Restaurant identity
    pub restaurant_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub logo_path: Option<String>,
    // Printer
    pub default_printer: String,
    pub auto_print: bool,
    // Tables
    pub table_count: i32,
    // App preferences
    pub dark_mode: bool,
    pub auto_refresh: bool,
    pub language: String,
    /// Fraction, e.g. 0.16 for 16%
    pub tax_rate: f64,
    pub currency_symbol: String,
    pub updated_at: i64,
}

/// Restaurant identity update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSettingsUpdate {
    pub restaurant_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterSettingsUpdate {
    pub default_printer: String,
    #[serde(default)]
    pub auto_print: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSettingsUpdate {
    pub table_count: i32,
}

/// App preferences update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettingsUpdate {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub auto_refresh: bool,
    pub language: Option<String>,
    pub tax_rate: Option<f64>,
    pub currency_symbol: Option<String>,
}
