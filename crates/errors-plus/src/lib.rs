//! errors-plus - Document the errors of HTTP endpoints in OpenAPI
//!
//! errors-plus takes the error sources you already have (raw `responses` fragments,
//! your domain error types, and one-word flags for the usual suspects) and merges them
//! into one `responses` map for a route. Nothing is overwritten: every example
//! survives, and descriptions follow a fixed precedence.
//!
//! # Quick Start
//!
//! ```
//! use errors_plus::prelude::*;
//! use serde_json::json;
//!
//! struct NotificationNotFound;
//!
//! impl ErrorDto for NotificationNotFound {
//!     fn status_code(&self) -> u16 {
//!         404
//!     }
//!
//!     fn message(&self) -> String {
//!         "Notification not found".to_string()
//!     }
//!
//!     fn to_example(&self) -> Examples {
//!         Examples::from([(self.message(), Example::detail(self.message()))])
//!     }
//! }
//!
//! let responses = errors![
//!     NotificationNotFound,
//!     json!({"409": {"description": "Conflict"}});
//!     unauthorized_401 = true,
//!     forbidden_403 = true,
//! ]?;
//!
//! let operation = OpenApiOperation::new("Delete notification").with_responses(&responses)?;
//! assert!(operation.responses.contains_key("404"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Sources
//!
//! | Source | Example | Description priority |
//! |--------|---------|----------------------|
//! | Raw fragment | `json!({"404": {"description": ...}})`, [`RawDescriptor`] | highest |
//! | Error DTO | any [`ErrorDto`], [`BaseErrorDto`], [`StandardErrorDto`] | middle |
//! | Flag | `unauthorized_401 = true` | lowest |
//!
//! # Standard Flags
//!
//! | Status | Legacy flag | Explicit flag | Default |
//! |--------|-------------|---------------|---------|
//! | 401 | `unauthorized` | `unauthorized_401` | off |
//! | 403 | `forbidden` | `forbidden_403` | off |
//! | 422 | `validation_error` | `validation_error_422` | **on** |
//! | 500 | `internal_server_error` | `internal_server_error_500` | off |
//!
//! Either flag of a pair turns its error on. The validation error is documented
//! unless one of its flags is `false` and the other is not `true`.
//!
//! # Example Keys
//!
//! - Named examples keep their key; a later duplicate becomes `key_2`, `key_3`, ...
//! - A singular `example` is stored as `Example<status>` (e.g. `Example404`).
//! - Flag examples use reserved keys (`StandardUnauthorized`, ...) that no other
//!   source can take.
//!
//! # Feature Flags
//!
//! - `config` - load [`ErrorFlags`] from TOML (requires toml)

mod aggregate;
mod classify;

pub use aggregate::Errors;

// Re-export core types
pub use errors_plus_core::*;
pub use errors_plus_openapi::{
    AggregateError, DEFAULT_MEDIA_TYPE, MediaTypeContent, OpenApiOperation, ResponseFragment, ResponseMerger,
    Responses, Result, is_reserved_example_key, is_valid_status_code, synthetic_example_key,
};

// Re-export serde_json for descriptor literals
pub use serde_json;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::errors;
    pub use super::{
        BaseErrorDto, Descriptor, ErrorDto, ErrorFlags, Errors, Example, Examples, Flag, OpenApiOperation,
        RawDescriptor, Responses, StandardErrorDto,
    };
}
