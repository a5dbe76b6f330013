//! # API Error Type
//!
//! What the presentation layer receives when an intent cannot be applied.
//!
//! ```json
//! { "code": "VALIDATION_ERROR", "message": "Invalid argument: shipping index must be between 0 and 2, got 5" }
//! ```

use serde::Serialize;
use sepet_core::CartError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Argument failed validation
    ValidationError,

    /// The order loader settled with an error
    SubmissionFailed,

    /// The intent itself could not be parsed
    BadRequest,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        let code = match &err {
            CartError::InvalidArgument(_) => ErrorCode::ValidationError,
            CartError::ProductNotFound(_) => ErrorCode::NotFound,
            CartError::SubmissionFailed(_) => ErrorCode::SubmissionFailed,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Malformed intent: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use sepet_core::{ProductId, ValidationError};

    #[test]
    fn test_cart_errors_map_to_codes() {
        let err: ApiError = CartError::ProductNotFound(ProductId(9)).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 9");

        let err: ApiError = CartError::InvalidArgument(ValidationError::Required {
            field: "name".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::bad_request("nope");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "BAD_REQUEST", "message": "nope" }));
    }
}
