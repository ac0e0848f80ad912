//! Typed OpenAPI response structures.
//!
//! These types represent the subset of OpenAPI 3.0 that error documentation needs:
//! per-status response objects with named examples, and an operation to attach them to.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Media type used for protocol and flag-derived examples.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Named examples, in insertion order.
pub type Examples = IndexMap<String, Example>;

/// A single named example (`{"value": ...}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Example {
    /// The example payload.
    pub value: Value,
    /// Short summary shown next to the example name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description of the example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Other example fields (e.g. `externalValue`, `x-*` extensions), kept as given.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Example {
    /// Wrap a payload.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            summary: None,
            description: None,
            extra: Map::new(),
        }
    }

    /// The conventional `{"detail": message}` payload.
    pub fn detail(message: impl Into<String>) -> Self {
        Self::new(serde_json::json!({ "detail": message.into() }))
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Examples for one media type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaTypeContent {
    /// Named examples, in merge order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: Examples,
    /// Other media type fields (e.g. `schema`), kept as given.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The documentation of one status code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseFragment {
    /// Human-readable description of the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Content keyed by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaTypeContent>,
    /// Other response fields (e.g. `headers`, `links`), kept as given.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseFragment {
    /// Examples under a media type, if any.
    pub fn examples(&self, media_type: &str) -> Option<&Examples> {
        self.content.get(media_type).map(|c| &c.examples)
    }

    /// Examples under `application/json`, if any.
    pub fn json_examples(&self) -> Option<&Examples> {
        self.examples(DEFAULT_MEDIA_TYPE)
    }

    /// Total number of examples across all media types.
    pub fn example_count(&self) -> usize {
        self.content.values().map(|c| c.examples.len()).sum()
    }
}

/// Aggregated error responses keyed by HTTP status code.
///
/// Behaves like a read-only map for consumers and stays mutable for callers that
/// want to adjust flag-derived content before attaching it to a route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Responses(IndexMap<u16, ResponseFragment>);

impl Responses {
    /// Create an empty response map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragment for a status code, if documented.
    pub fn get(&self, status_code: u16) -> Option<&ResponseFragment> {
        self.0.get(&status_code)
    }

    /// Mutable fragment for a status code, if documented.
    pub fn get_mut(&mut self, status_code: u16) -> Option<&mut ResponseFragment> {
        self.0.get_mut(&status_code)
    }

    /// Whether a status code is documented.
    pub fn contains(&self, status_code: u16) -> bool {
        self.0.contains_key(&status_code)
    }

    /// Insert or replace the fragment for a status code.
    pub fn insert(&mut self, status_code: u16, fragment: ResponseFragment) -> Option<ResponseFragment> {
        self.0.insert(status_code, fragment)
    }

    /// Remove a status code, keeping the order of the others.
    pub fn remove(&mut self, status_code: u16) -> Option<ResponseFragment> {
        self.0.shift_remove(&status_code)
    }

    /// Number of documented status codes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no status code is documented.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(status code, fragment)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, u16, ResponseFragment> {
        self.0.iter()
    }

    /// Status codes in insertion order.
    pub fn status_codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.keys().copied()
    }

    /// Convert to an OpenAPI `responses` object (status codes as string keys).
    pub fn to_json_map(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut map = Map::new();
        for (status, fragment) in &self.0 {
            map.insert(status.to_string(), serde_json::to_value(fragment)?);
        }
        Ok(map)
    }

    /// Convert to a JSON object value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        self.to_json_map().map(Value::Object)
    }
}

impl std::ops::Index<u16> for Responses {
    type Output = ResponseFragment;

    fn index(&self, status_code: u16) -> &ResponseFragment {
        &self.0[&status_code]
    }
}

impl From<IndexMap<u16, ResponseFragment>> for Responses {
    fn from(map: IndexMap<u16, ResponseFragment>) -> Self {
        Self(map)
    }
}

impl From<Responses> for IndexMap<u16, ResponseFragment> {
    fn from(responses: Responses) -> Self {
        responses.0
    }
}

impl IntoIterator for Responses {
    type Item = (u16, ResponseFragment);
    type IntoIter = indexmap::map::IntoIter<u16, ResponseFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = (&'a u16, &'a ResponseFragment);
    type IntoIter = indexmap::map::Iter<'a, u16, ResponseFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An OpenAPI operation (endpoint), the attachment point for error responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiOperation {
    /// Short summary of the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Unique operation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Response definitions keyed by status code.
    #[serde(default)]
    pub responses: Map<String, Value>,
    /// Additional fields not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OpenApiOperation {
    /// Create a new operation with a summary.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Default::default()
        }
    }

    /// Set the operation ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    /// Add a response.
    pub fn with_response(mut self, status: impl Into<String>, response: Value) -> Self {
        self.responses.insert(status.into(), response);
        self
    }

    /// Attach aggregated error responses, replacing entries for the same status codes.
    pub fn with_responses(mut self, responses: &Responses) -> Result<Self, serde_json::Error> {
        for (status, response) in responses.to_json_map()? {
            self.responses.insert(status, response);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn not_found() -> ResponseFragment {
        let mut content = MediaTypeContent::default();
        content
            .examples
            .insert("Not found".to_string(), Example::detail("Not found"));
        ResponseFragment {
            description: Some("Not found".to_string()),
            content: IndexMap::from([(DEFAULT_MEDIA_TYPE.to_string(), content)]),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_fragment_serializes_openapi_shape() {
        let value = serde_json::to_value(not_found()).unwrap();
        assert_eq!(
            value,
            json!({
                "description": "Not found",
                "content": {
                    "application/json": {
                        "examples": {
                            "Not found": {"value": {"detail": "Not found"}}
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_responses_map_access() {
        let mut responses = Responses::new();
        assert!(responses.is_empty());
        responses.insert(404, not_found());
        responses.insert(401, ResponseFragment::default());

        assert_eq!(responses.len(), 2);
        assert!(responses.contains(404));
        assert_eq!(responses[404].description.as_deref(), Some("Not found"));
        assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![404, 401]);

        responses.remove(404);
        assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![401]);
    }

    #[test]
    fn test_responses_json_keys_are_strings() {
        let mut responses = Responses::new();
        responses.insert(404, not_found());
        let map = responses.to_json_map().unwrap();
        assert!(map.contains_key("404"));
        assert_eq!(map["404"]["description"], "Not found");
    }

    #[test]
    fn test_operation_with_responses() {
        let mut responses = Responses::new();
        responses.insert(404, not_found());

        let op = OpenApiOperation::new("Delete item")
            .with_id("delete_item")
            .with_response("204", json!({"description": "Deleted"}))
            .with_responses(&responses)
            .unwrap();

        assert_eq!(op.responses["204"]["description"], "Deleted");
        assert_eq!(op.responses["404"]["description"], "Not found");

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["operationId"], "delete_item");
    }

    #[test]
    fn test_media_type_without_examples_keeps_shape() {
        let input = json!({"schema": {"$ref": "#/components/schemas/Error"}});
        let content: MediaTypeContent = serde_json::from_value(input.clone()).unwrap();
        assert!(content.examples.is_empty());
        assert_eq!(serde_json::to_value(&content).unwrap(), input);
    }

    #[test]
    fn test_example_keeps_unmodeled_fields() {
        let input = json!({
            "value": {"detail": "x"},
            "summary": "Remote",
            "externalValue": "https://example.com/a.json",
            "x-internal": true
        });
        let example: Example = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(example.summary.as_deref(), Some("Remote"));
        assert_eq!(example.extra["externalValue"], "https://example.com/a.json");
        assert_eq!(serde_json::to_value(&example).unwrap(), input);
    }
}
