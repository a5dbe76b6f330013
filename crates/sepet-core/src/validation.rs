//! # Validation Module
//!
//! Input validation for Sepet.
//!
//! ## What Gets Validated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog construction ──► product name, price ≥ 0, unique ids          │
//! │                                                                         │
//! │  update_quantity ───────► quantity ≥ 1 (rejected silently by the cart) │
//! │                                                                         │
//! │  change_shipping ───────► index < options.len() (InvalidArgument)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing else is validated: quantities have no upper bound and names are
//! not restricted beyond being non-empty.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name (must not be blank).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price (must not be negative).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a requested line quantity.
///
/// ## Rules
/// - Must be at least 1; there is no upper bound
///
/// ## Example
/// ```rust
/// use sepet_core::validation::validate_quantity;
///
/// assert!(validate_quantity(3).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-1).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<i64> {
    if quantity < 1 {
        return Err(ValidationError::BelowMinimum {
            field: "quantity".to_string(),
            value: quantity,
        });
    }

    Ok(quantity)
}

/// Validates an index into a list of `len` entries.
pub fn validate_index(field: &str, index: usize, len: usize) -> ValidationResult<usize> {
    if index >= len {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: len as i64 - 1,
            value: index as i64,
        });
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Ürün A").is_ok());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_validate_quantity_floor() {
        assert_eq!(validate_quantity(1), Ok(1));
        assert_eq!(validate_quantity(10_000), Ok(10_000));
        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::BelowMinimum { value: 0, .. })
        ));
    }

    #[test]
    fn test_validate_index() {
        assert_eq!(validate_index("shipping index", 2, 3), Ok(2));

        let err = validate_index("shipping index", 3, 3).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "shipping index".to_string(),
                min: 0,
                max: 2,
                value: 3,
            }
        );
    }

    #[test]
    fn test_validate_index_on_empty_list() {
        let err = validate_index("shipping index", 0, 0).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { max: -1, .. }));
    }
}
