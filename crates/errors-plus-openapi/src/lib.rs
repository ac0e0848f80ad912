//! OpenAPI error-response composition for errors-plus.
//!
//! This crate provides the response types and the merge engine that combines error
//! documentation from multiple sources into one collision-free `responses` map.
//!
//! # Example
//!
//! ```
//! use errors_plus_openapi::{Example, Examples, ResponseMerger};
//! use serde_json::json;
//!
//! let mut merger = ResponseMerger::new();
//! merger.merge_raw_fragment(404, &json!({
//!     "description": "Not found",
//!     "content": {"application/json": {"example": {"detail": "Item not found"}}}
//! }))?;
//! merger.merge_protocol(
//!     404,
//!     "Notification not found",
//!     Examples::from([("Notification not found".to_string(), Example::detail("Notification not found"))]),
//! );
//!
//! let responses = merger.finish();
//! assert_eq!(responses[404].description.as_deref(), Some("Not found"));
//! assert_eq!(responses[404].example_count(), 2);
//! # Ok::<(), errors_plus_openapi::AggregateError>(())
//! ```

mod error;
mod merge;
mod types;

pub use error::AggregateError;
pub use merge::{ResponseMerger, is_reserved_example_key, is_valid_status_code, synthetic_example_key};
pub use types::*;

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;
