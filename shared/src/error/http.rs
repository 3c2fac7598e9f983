//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::OrderItemNotFound
            | Self::SettingsNotFound
            | Self::BackupNotFound
            | Self::BackupFileMissing
            | Self::ProductNotFound
            | Self::TableNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::TableOccupied
            | Self::TableNumberExists
            | Self::CategoryExists
            | Self::TablesInUse => StatusCode::CONFLICT,

            // 422 Unprocessable: request is well-formed but the order state forbids it
            Self::InvalidTransition | Self::OrderClosed | Self::ProductUnavailable => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and malformed input)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
