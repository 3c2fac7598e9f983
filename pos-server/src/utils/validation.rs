//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, restaurant, category
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions (order notes, item notes, product description)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, printer name, language, currency symbol
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Logo paths
pub const MAX_URL_LEN: usize = 2048;

pub const MAX_ADDRESS_LEN: usize = 500;

/// Upper bound for a single line quantity
pub const MAX_QUANTITY: i32 = 9999;

/// Upper bound for a product price
pub const MAX_PRICE: f64 = 1_000_000.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a product price: finite, non-negative, bounded.
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 || price > MAX_PRICE {
        return Err(AppError::with_message(
            crate::utils::ErrorCode::ProductInvalidPrice,
            format!("price must be between 0 and {MAX_PRICE}, got {price}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Resto", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("sin cebolla".into()), "notes", MAX_NOTE_LEN).is_ok());
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "notes", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(8.99).is_ok());
        assert_eq!(
            validate_price(-1.0).unwrap_err().code,
            ErrorCode::ProductInvalidPrice
        );
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }
}
