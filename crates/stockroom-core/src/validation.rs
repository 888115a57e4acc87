//! # Validation Module
//!
//! Input checks run before a record is built or mutated.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_condition, validate_name};
//!
//! validate_name("name", "Hammer").unwrap();
//! validate_condition(100).unwrap();
//! assert!(validate_condition(101).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CONDITION, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item or user name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Missing {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Returns the value of a required free-text field.
///
/// `None` and blank strings both count as missing.
pub fn require_text(field: &str, value: Option<String>) -> ValidationResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ValidationError::Missing {
            field: field.to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tool condition.
///
/// ## Rules
/// - Between 0 and 100 inclusive
pub fn validate_condition(condition: u32) -> ValidationResult<()> {
    if condition > MAX_CONDITION {
        return Err(ValidationError::AboveMaximum {
            field: "condition".to_string(),
            value: i64::from(condition),
            max: i64::from(MAX_CONDITION),
        });
    }

    Ok(())
}

/// Validates a unit cost.
///
/// Zero is allowed (free items), negative is not.
pub fn validate_cost(cost: Money) -> ValidationResult<()> {
    if cost.is_negative() {
        return Err(ValidationError::Negative {
            field: "cost".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity taken from stock.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::Zero {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Hammer").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(201)).is_err());
        assert!(validate_name("name", &"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_require_text() {
        assert_eq!(
            require_text("supplier", Some("Acme".to_string())).unwrap(),
            "Acme"
        );
        assert!(require_text("supplier", Some("  ".to_string())).is_err());
        assert!(require_text("supplier", None).is_err());
    }

    #[test]
    fn test_validate_condition() {
        assert!(validate_condition(0).is_ok());
        assert!(validate_condition(100).is_ok());
        assert!(validate_condition(101).is_err());
    }

    #[test]
    fn test_validate_cost() {
        assert!(validate_cost(Money::zero()).is_ok());
        assert!(validate_cost(Money::from_cents(1099)).is_ok());
        assert!(validate_cost(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
    }
}
