//! Positional error descriptors accepted by the aggregator.

use crate::protocol::ErrorDto;
use serde_json::{Value, json};
use std::fmt;

/// One caller-supplied unit of error documentation.
pub enum Descriptor {
    /// Raw response fragments keyed by status code.
    Raw(RawDescriptor),
    /// A typed error DTO.
    Protocol(Box<dyn ErrorDto>),
    /// Unclassified JSON: either a `{"404": {...}}` mapping or a serialized DTO
    /// (`{"status_code": ..., "message": ..., "to_example": {...}}`).
    Json(Value),
}

impl Descriptor {
    /// Wrap an error DTO.
    pub fn error(dto: impl ErrorDto + 'static) -> Self {
        Descriptor::Protocol(Box::new(dto))
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Descriptor::Protocol(dto) => f
                .debug_struct("Protocol")
                .field("type_name", &dto.type_name())
                .field("status_code", &dto.status_code())
                .finish(),
            Descriptor::Json(value) => f.debug_tuple("Json").field(value).finish(),
        }
    }
}

/// Conversion into a [`Descriptor`].
///
/// Implemented for every [`ErrorDto`], for [`RawDescriptor`] and for JSON values.
pub trait IntoDescriptor {
    fn into_descriptor(self) -> Descriptor;
}

impl IntoDescriptor for Descriptor {
    fn into_descriptor(self) -> Descriptor {
        self
    }
}

impl IntoDescriptor for RawDescriptor {
    fn into_descriptor(self) -> Descriptor {
        Descriptor::Raw(self)
    }
}

impl IntoDescriptor for Value {
    fn into_descriptor(self) -> Descriptor {
        Descriptor::Json(self)
    }
}

impl<T: ErrorDto + 'static> IntoDescriptor for T {
    fn into_descriptor(self) -> Descriptor {
        Descriptor::Protocol(Box::new(self))
    }
}

/// Raw response fragments in the OpenAPI `responses` shape, keyed by status code.
///
/// ```
/// use errors_plus_core::RawDescriptor;
/// use serde_json::json;
///
/// let raw = RawDescriptor::status(404)
///     .description("Not found")
///     .example("application/json", json!({"detail": "Item not found"}));
/// assert_eq!(raw.fragments()[0].1["description"], "Not found");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDescriptor {
    fragments: Vec<(u16, Value)>,
}

impl RawDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a descriptor with an empty fragment for `status_code`.
    pub fn status(status_code: u16) -> Self {
        Self::new().response(status_code, json!({}))
    }

    /// Add a complete fragment.
    pub fn response(mut self, status_code: u16, fragment: Value) -> Self {
        self.fragments.push((status_code, fragment));
        self
    }

    /// Set the description of the last added fragment.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        if let Some((_, fragment)) = self.fragments.last_mut() {
            fragment["description"] = Value::String(description.into());
        }
        self
    }

    /// Set the single example of the last added fragment.
    pub fn example(mut self, media_type: &str, value: Value) -> Self {
        if let Some((_, fragment)) = self.fragments.last_mut() {
            fragment["content"][media_type]["example"] = value;
        }
        self
    }

    /// Add a named example to the last added fragment.
    pub fn named_example(mut self, media_type: &str, key: &str, value: Value) -> Self {
        if let Some((_, fragment)) = self.fragments.last_mut() {
            fragment["content"][media_type]["examples"][key] = json!({ "value": value });
        }
        self
    }

    /// Fragments in insertion order.
    pub fn fragments(&self) -> &[(u16, Value)] {
        &self.fragments
    }

    /// Consume the descriptor, returning its fragments.
    pub fn into_fragments(self) -> Vec<(u16, Value)> {
        self.fragments
    }
}
