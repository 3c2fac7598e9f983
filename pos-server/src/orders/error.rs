use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

/// Order lifecycle errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("Order item not found: {0}")]
    ItemNotFound(i64),

    #[error("Item {item_id} does not belong to order {order_id}")]
    ItemNotInOrder { order_id: i64, item_id: i64 },

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Product is not available: {0}")]
    ProductUnavailable(String),

    #[error("Table not found: {0}")]
    TableNotFound(i32),

    #[error("Table {0} is already occupied")]
    TableOccupied(i32),

    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order {id} is {status} and can no longer be modified")]
    OrderClosed { id: i64, status: OrderStatus },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message).with_detail("order_id", id)
            }
            OrderError::ItemNotFound(id) => {
                AppError::with_message(ErrorCode::OrderItemNotFound, message)
                    .with_detail("item_id", id)
            }
            OrderError::ItemNotInOrder { order_id, item_id } => {
                AppError::with_message(ErrorCode::ItemNotInOrder, message)
                    .with_detail("order_id", order_id)
                    .with_detail("item_id", item_id)
            }
            OrderError::ProductNotFound(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, message)
                    .with_detail("product_id", id)
            }
            OrderError::ProductUnavailable(name) => {
                AppError::with_message(ErrorCode::ProductUnavailable, message)
                    .with_detail("product", name)
            }
            OrderError::TableNotFound(number) => {
                AppError::with_message(ErrorCode::TableNotFound, message)
                    .with_detail("table_number", number)
            }
            OrderError::TableOccupied(number) => {
                AppError::with_message(ErrorCode::TableOccupied, message)
                    .with_detail("table_number", number)
            }
            OrderError::InvalidTransition { from, to } => {
                AppError::invalid_transition(from.as_str(), to.as_str())
            }
            OrderError::OrderClosed { id, status } => {
                AppError::with_message(ErrorCode::OrderClosed, message)
                    .with_detail("order_id", id)
                    .with_detail("status", status.as_str())
            }
            OrderError::InvalidInput(msg) => AppError::validation(msg),
            OrderError::Repo(e) => e.into(),
            OrderError::Database(e) => AppError::database(e.to_string()),
        }
    }
}
