//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (ids, statuses, field names)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Order status change rejected
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        Self::with_message(
            ErrorCode::InvalidTransition,
            format!("Cannot change order status from {} to {}", from, to),
        )
        .with_detail("from", from)
        .with_detail("to", to)
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageError, msg)
    }
}

/// Unified API error body
///
/// - `code`: Error code
/// - `message`: Human-readable message
/// - `data`: Always empty on errors; kept so clients can share one envelope type
/// - `details`: Additional error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Store failures are logged in full; the client only sees the generic message
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
            let body = ApiResponse::<()>::error(&AppError::new(self.code));
            return (status, Json(body)).into_response();
        }

        let body = ApiResponse::<()>::error(&self);
        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = match self.code {
            Some(0) | None => StatusCode::OK,
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::ItemNotInOrder)
            .with_detail("order_id", 7)
            .with_detail("item_id", 42);

        let details = err.details.unwrap();
        assert_eq!(details.get("order_id").unwrap(), 7);
        assert_eq!(details.get("item_id").unwrap(), 42);
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::TableOccupied).http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::invalid_transition("completed", "cancelled").http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_invalid_transition_details() {
        let err = AppError::invalid_transition("completed", "cancelled");
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert_eq!(
            err.message,
            "Cannot change order status from completed to cancelled"
        );
        let details = err.details.unwrap();
        assert_eq!(details.get("from").unwrap(), "completed");
        assert_eq!(details.get("to").unwrap(), "cancelled");
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::validation("Quantity cannot be negative");
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = AppError::database("Connection failed");
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::new(ErrorCode::TableOccupied).with_detail("table_number", 3);
        let response = ApiResponse::<()>::error(&err);

        assert_eq!(response.code, Some(7002));
        assert_eq!(response.message, "Table is already occupied");
        assert!(response.data.is_none());
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize() {
        let err = AppError::validation("bad id");
        let json = serde_json::to_string(&ApiResponse::<()>::error(&err)).unwrap();
        assert!(json.contains("\"message\":\"bad id\""));
        assert!(!json.contains("\"data\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_system_error_hides_message() {
        use axum::response::IntoResponse;

        let response = AppError::database("disk I/O error at page 17").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
