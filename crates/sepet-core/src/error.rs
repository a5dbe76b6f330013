//! # Error Types
//!
//! Domain-specific error types for sepet-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sepet-core errors (this file)                                         │
//! │  ├── CartError        - Domain errors surfaced by the store            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  sepet-store errors (separate crate)                                   │
//! │  └── StoreError       - Configuration and runtime failures             │
//! │                                                                         │
//! │  demo app errors                                                       │
//! │  └── ApiError         - What the presentation sees (serialized)        │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → ApiError → Presentation           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation Policy
//! - Quantity updates and removals on unknown ids are NOT errors (silent no-op)
//! - A shipping index out of range is an `InvalidArgument`
//! - A failed order submission is reported, never re-raised by the store

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart domain errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    /// An argument failed validation.
    ///
    /// ## When This Occurs
    /// - `change_shipping` called with an index past the end of the options
    /// - A catalog built with duplicate ids or negative prices
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Product id does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The order loader settled with an error.
    ///
    /// ## User Workflow
    /// ```text
    /// submit_order()
    ///      │
    ///      ▼
    /// loader settles as Error("...")
    ///      │
    ///      ▼
    /// SubmissionFailed("...") is logged, cart stays intact
    /// ```
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        value: i64,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value must be at least one.
    #[error("{field} must be at least 1, got {value}")]
    BelowMinimum { field: String, value: i64 },

    /// Duplicate value (e.g., duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::ProductNotFound(ProductId(7));
        assert_eq!(err.to_string(), "Product not found: 7");

        let err = CartError::SubmissionFailed("backend unavailable".to_string());
        assert_eq!(err.to_string(), "Order submission failed: backend unavailable");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "shipping index".to_string(),
            min: 0,
            max: 2,
            value: 5,
        };
        assert_eq!(err.to_string(), "shipping index must be between 0 and 2, got 5");

        let err = ValidationError::BelowMinimum {
            field: "quantity".to_string(),
            value: 0,
        };
        assert_eq!(err.to_string(), "quantity must be at least 1, got 0");
    }

    #[test]
    fn test_validation_converts_to_invalid_argument() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::InvalidArgument(_)));
        assert_eq!(cart_err.to_string(), "Invalid argument: name is required");
    }
}
