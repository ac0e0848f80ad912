//! The error DTO protocol and its convenience implementations.

use errors_plus_openapi::{Example, Examples};
use serde::{Deserialize, Serialize};

/// An error that can document itself in OpenAPI.
///
/// Implement this for your domain errors so the same type is raised at runtime and
/// listed in the route documentation:
///
/// ```
/// use errors_plus_core::{ErrorDto, Examples, Example};
///
/// struct NotificationNotFound;
///
/// impl ErrorDto for NotificationNotFound {
///     fn status_code(&self) -> u16 {
///         404
///     }
///
///     fn message(&self) -> String {
///         "Notification not found".to_string()
///     }
///
///     fn to_example(&self) -> Examples {
///         Examples::from([(self.message(), Example::detail(self.message()))])
///     }
/// }
/// ```
pub trait ErrorDto {
    /// HTTP status code for the error.
    fn status_code(&self) -> u16;

    /// Error message, used as the response description.
    fn message(&self) -> String;

    /// Named examples, conventionally `{message: {"value": {"detail": message}}}`.
    fn to_example(&self) -> Examples;

    /// Type name reported in configuration errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<T: ErrorDto + ?Sized> ErrorDto for &T {
    fn status_code(&self) -> u16 {
        (**self).status_code()
    }

    fn message(&self) -> String {
        (**self).message()
    }

    fn to_example(&self) -> Examples {
        (**self).to_example()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl<T: ErrorDto + ?Sized> ErrorDto for Box<T> {
    fn status_code(&self) -> u16 {
        (**self).status_code()
    }

    fn message(&self) -> String {
        (**self).message()
    }

    fn to_example(&self) -> Examples {
        (**self).to_example()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

/// Plain error DTO with a single `{"detail": message}` example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseErrorDto {
    /// HTTP status code.
    pub status_code: u16,
    /// Message used for the description and the `detail` payload.
    pub message: String,
}

impl BaseErrorDto {
    /// Create a DTO for a status code and message.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl ErrorDto for BaseErrorDto {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn to_example(&self) -> Examples {
        Examples::from([(self.message.clone(), Example::detail(&self.message))])
    }
}

/// Error DTO with several causes sharing one status, e.g. the different ways a
/// request can be unauthorized.
///
/// Without explicit examples it behaves like [`BaseErrorDto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardErrorDto {
    /// HTTP status code.
    pub status_code: u16,
    /// Message used for the description.
    pub message: String,
    /// `(key, detail message)` pairs.
    #[serde(default)]
    pub examples: Vec<(String, String)>,
}

impl StandardErrorDto {
    /// Create a DTO with no explicit examples.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            examples: Vec::new(),
        }
    }

    /// Add an example with its own detail message.
    pub fn with_example(mut self, key: impl Into<String>, detail: impl Into<String>) -> Self {
        self.examples.push((key.into(), detail.into()));
        self
    }
}

impl ErrorDto for StandardErrorDto {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn to_example(&self) -> Examples {
        if self.examples.is_empty() {
            return Examples::from([(self.message.clone(), Example::detail(&self.message))]);
        }
        self.examples
            .iter()
            .map(|(key, detail)| (key.clone(), Example::detail(detail)))
            .collect()
    }
}
