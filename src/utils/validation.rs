//! Validation helpers
//!
//! Custom validators used by the request DTOs through
//! `#[validate(custom = "...")]`, plus normalisation of natural keys.

use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

/// Rejects strings that are empty once trimmed
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Rejects zero and negative values
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Rejects negative values
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Largest magnitude a `NUMERIC(14,2)` money column holds
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Whether a money value fits the money columns
pub fn amount_in_range(value: Decimal) -> bool {
    value.abs() <= MAX_AMOUNT
}

/// Rejects values whose magnitude does not fit the money columns
pub fn validate_amount_range(value: &Decimal) -> Result<(), ValidationError> {
    if !amount_in_range(*value) {
        let mut error = ValidationError::new("amount_range");
        error.add_param("value".into(), value);
        error.add_param("max".into(), &MAX_AMOUNT);
        return Err(error);
    }
    Ok(())
}

/// `validate_positive` plus the money column range, for decimal DTO fields
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)?;
    validate_amount_range(value)
}

/// `validate_non_negative` plus the money column range, for decimal DTO fields
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)?;
    validate_amount_range(value)
}

/// Canonical form of a plate number: trimmed and upper-cased.
///
/// Uniqueness is checked against this form, so "abc-123" and "ABC-123"
/// collide.
pub fn normalize_plate_number(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Trims optional free-text input, mapping blank strings to `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Toyota").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
        assert!(validate_positive_amount(&Decimal::new(500000, 0)).is_ok());
        assert!(validate_positive_amount(&Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative_amount(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_amount(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_max_amount_matches_money_columns() {
        assert_eq!(MAX_AMOUNT, Decimal::new(99_999_999_999_999, 2));
    }

    #[test]
    fn test_amounts_beyond_money_columns_are_rejected() {
        assert!(validate_non_negative_amount(&MAX_AMOUNT).is_ok());
        assert!(validate_non_negative_amount(&Decimal::new(100_000_000_000_000, 2)).is_err());
        assert!(validate_positive_amount(&Decimal::MAX).is_err());
        assert!(validate_amount_range(&Decimal::new(-50, 0)).is_ok());
        assert!(validate_amount_range(&-Decimal::MAX).is_err());
    }

    #[test]
    fn test_normalize_plate_number() {
        assert_eq!(normalize_plate_number("abc-123"), "ABC-123");
        assert_eq!(normalize_plate_number("  xyz 987 "), "XYZ 987");
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  note ".into())), Some("note".to_string()));
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(normalize_optional(None), None);
    }
}
