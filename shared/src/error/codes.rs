//! Error codes for the POS server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Settings / backup errors
//! - 6xxx: Product errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a plain `u16` so display clients can switch on it
/// without knowing the Rust variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4002,
    /// Item belongs to a different order
    ItemNotInOrder = 4003,
    /// Status change not allowed from the current status
    InvalidTransition = 4004,
    /// Order is completed or cancelled and can no longer be edited
    OrderClosed = 4005,

    // ==================== 5xxx: Settings ====================
    /// Settings row missing
    SettingsNotFound = 5001,
    /// Backup record not found
    BackupNotFound = 5002,
    /// Backup file missing on disk
    BackupFileMissing = 5003,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product is not available for ordering
    ProductUnavailable = 6003,
    /// Category name already in use
    CategoryExists = 6004,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is already occupied
    TableOccupied = 7002,
    /// Table number already exists
    TableNumberExists = 7003,
    /// Operation blocked by occupied tables
    TablesInUse = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// File system error
    StorageError = 9004,
    /// Operation timed out
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::ItemNotInOrder => "Item does not belong to this order",
            ErrorCode::InvalidTransition => "Order status change not allowed",
            ErrorCode::OrderClosed => "Order is already closed",

            ErrorCode::SettingsNotFound => "Settings not found",
            ErrorCode::BackupNotFound => "Backup not found",
            ErrorCode::BackupFileMissing => "Backup file is missing",

            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductUnavailable => "Product is not available",
            ErrorCode::CategoryExists => "Category already exists",

            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableOccupied => "Table is already occupied",
            ErrorCode::TableNumberExists => "Table number already exists",
            ErrorCode::TablesInUse => "There are occupied tables",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageError => "File system error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderItemNotFound),
            4003 => Ok(ErrorCode::ItemNotInOrder),
            4004 => Ok(ErrorCode::InvalidTransition),
            4005 => Ok(ErrorCode::OrderClosed),

            // Settings
            5001 => Ok(ErrorCode::SettingsNotFound),
            5002 => Ok(ErrorCode::BackupNotFound),
            5003 => Ok(ErrorCode::BackupFileMissing),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductUnavailable),
            6004 => Ok(ErrorCode::CategoryExists),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableOccupied),
            7003 => Ok(ErrorCode::TableNumberExists),
            7004 => Ok(ErrorCode::TablesInUse),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
