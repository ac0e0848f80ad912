//! Error types for error-response aggregation.

use thiserror::Error;

/// Errors that can occur while aggregating error responses.
///
/// Both variants describe a defect in the caller's descriptors. Aggregation
/// never returns a partial result alongside one of these.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A descriptor is neither a raw status mapping nor a complete error DTO.
    #[error(
        "Invalid error descriptor at position {position} ({type_name}): {message}{}",
        missing_suffix(.missing)
    )]
    Configuration {
        /// Zero-based index of the offending positional argument.
        position: usize,
        /// Rust type name or JSON kind of the argument.
        type_name: String,
        /// Facets (`status_code`, `message`, `to_example`) that are missing or malformed.
        missing: Vec<&'static str>,
        message: String,
    },

    /// A raw fragment has a nested value of the wrong shape.
    #[error("Malformed response fragment for status {status_code} at `{path}`: {message}")]
    MalformedFragment {
        status_code: u16,
        /// Slash-separated location of the offending value, e.g. `/404/content/application/json/examples/a`.
        path: String,
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn missing_suffix(missing: &[&'static str]) -> String {
    if missing.is_empty() {
        String::new()
    } else {
        format!(". Missing: {}", missing.join(", "))
    }
}

impl AggregateError {
    /// Build a configuration error for the argument at `position`.
    pub fn configuration(
        position: usize,
        type_name: impl Into<String>,
        missing: Vec<&'static str>,
        message: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            position,
            type_name: type_name.into(),
            missing,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(status_code: u16, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedFragment {
            status_code,
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_lists_missing_facets() {
        let err = AggregateError::configuration(
            2,
            "BadObject",
            vec!["message", "to_example"],
            "error DTO must have status_code, message and to_example",
        );
        let text = err.to_string();
        assert!(text.contains("position 2"));
        assert!(text.contains("BadObject"));
        assert!(text.ends_with("Missing: message, to_example"));
    }

    #[test]
    fn test_malformed_message_names_path() {
        let err = AggregateError::malformed(404, "/404/content", "expected an object");
        assert_eq!(
            err.to_string(),
            "Malformed response fragment for status 404 at `/404/content`: expected an object"
        );
    }
}
