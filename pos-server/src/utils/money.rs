//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// quantity × unit price
pub fn line_total(quantity: i32, unit_price: f64) -> Decimal {
    Decimal::from(quantity) * to_decimal(unit_price)
}

/// Σ(quantity × unit price) over `(quantity, unit_price)` lines, never negative
pub fn order_total<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (i32, f64)>,
{
    let sum: Decimal = lines
        .into_iter()
        .map(|(quantity, unit_price)| line_total(quantity, unit_price))
        .sum();
    to_f64(sum.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total_burger_and_soda() {
        assert_eq!(order_total([(2, 8.99), (1, 2.50)]), 20.48);
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_order_total_avoids_float_drift() {
        // 0.1 + 0.2 in f64 is 0.30000000000000004
        assert_eq!(order_total([(1, 0.1), (1, 0.2)]), 0.3);
        assert_eq!(order_total([(3, 3.33)]), 9.99);
    }

    #[test]
    fn test_order_total_clamped_at_zero() {
        assert_eq!(order_total([(1, -5.0)]), 0.0);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01);
    }
}
