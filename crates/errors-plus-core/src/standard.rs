//! Well-known error statuses that can be documented with a flag.

use errors_plus_openapi::synthetic_example_key;
use http::StatusCode;
use serde_json::{Value, json};

/// A standard HTTP error enabled by a boolean flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardError {
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden
    Forbidden,
    /// 422 Unprocessable Entity (request validation)
    ValidationError,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StandardError {
    /// All standard errors, in documentation order.
    pub const ALL: [StandardError; 4] = [
        StandardError::Unauthorized,
        StandardError::Forbidden,
        StandardError::ValidationError,
        StandardError::InternalServerError,
    ];

    /// HTTP status
    pub fn status(&self) -> StatusCode {
        match self {
            StandardError::Unauthorized => StatusCode::UNAUTHORIZED,
            StandardError::Forbidden => StatusCode::FORBIDDEN,
            StandardError::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            StandardError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    /// Canonical OpenAPI description.
    pub fn description(&self) -> &'static str {
        match self {
            StandardError::Unauthorized => "Unauthorized",
            StandardError::Forbidden => "Forbidden",
            StandardError::ValidationError => "Validation Error",
            StandardError::InternalServerError => "Internal Server Error",
        }
    }

    /// Message used in the canonical example payload.
    pub fn detail(&self) -> &'static str {
        match self {
            StandardError::ValidationError => "Validation error",
            other => other.description(),
        }
    }

    /// The reserved example key for this error.
    pub fn example_key(&self) -> String {
        synthetic_example_key(self.status_code())
    }

    /// Canonical example payload (`{"detail": ...}`).
    pub fn example(&self) -> Value {
        json!({ "detail": self.detail() })
    }

    /// Look up the standard error for a status code.
    pub fn from_status_code(status_code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.status_code() == status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StandardError::Unauthorized.status_code(), 401);
        assert_eq!(StandardError::Forbidden.status_code(), 403);
        assert_eq!(StandardError::ValidationError.status_code(), 422);
        assert_eq!(StandardError::InternalServerError.status_code(), 500);
    }

    #[test]
    fn test_example_keys_are_reserved() {
        assert_eq!(StandardError::Unauthorized.example_key(), "StandardUnauthorized");
        assert_eq!(StandardError::ValidationError.example_key(), "StandardValidationError");
        for error in StandardError::ALL {
            assert!(errors_plus_openapi::is_reserved_example_key(&error.example_key()));
        }
    }

    #[test]
    fn test_validation_example_detail() {
        assert_eq!(StandardError::ValidationError.description(), "Validation Error");
        assert_eq!(
            StandardError::ValidationError.example(),
            json!({"detail": "Validation error"})
        );
    }

    #[test]
    fn test_from_status_code() {
        assert_eq!(StandardError::from_status_code(403), Some(StandardError::Forbidden));
        assert_eq!(StandardError::from_status_code(404), None);
    }
}
