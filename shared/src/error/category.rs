//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category derived from the leading digit of the error code
///
/// - 0xxx: General errors
/// - 4xxx: Order errors
/// - 5xxx: Settings / backup errors
/// - 6xxx: Product errors
/// - 7xxx: Table errors
/// - 9xxx: System errors
///
/// Unassigned ranges fall back to `General`, anything at or above 9000 is `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Order,
    Settings,
    Product,
    Table,
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            4000..5000 => Self::Order,
            5000..6000 => Self::Settings,
            6000..7000 => Self::Product,
            7000..8000 => Self::Table,
            9000.. => Self::System,
            _ => Self::General,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Order => "order",
            Self::Settings => "settings",
            Self::Product => "product",
            Self::Table => "table",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(8), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(5002), ErrorCategory::Settings);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Product);
        assert_eq!(ErrorCategory::from_code(7999), ErrorCategory::Table);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::InvalidTransition.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::BackupNotFound.category(), ErrorCategory::Settings);
        assert_eq!(ErrorCode::ProductUnavailable.category(), ErrorCategory::Product);
        assert_eq!(ErrorCode::TableOccupied.category(), ErrorCategory::Table);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::Table).unwrap();
        assert_eq!(json, "\"table\"");

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
        assert_eq!(category.name(), "system");
    }
}
