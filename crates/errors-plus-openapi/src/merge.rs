//! Merge engine for composing error responses from multiple sources.

use crate::Result;
use crate::error::AggregateError;
use crate::types::{DEFAULT_MEDIA_TYPE, Example, Examples, MediaTypeContent, ResponseFragment, Responses};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Returns true for status codes an error response may document (100-599).
pub fn is_valid_status_code(status_code: u16) -> bool {
    (100..=599).contains(&status_code)
}

/// The example key reserved for the flag-derived entry of a status code.
pub fn synthetic_example_key(status_code: u16) -> String {
    match status_code {
        401 => "StandardUnauthorized".to_string(),
        403 => "StandardForbidden".to_string(),
        422 => "StandardValidationError".to_string(),
        500 => "StandardInternalServerError".to_string(),
        other => format!("Standard{other}"),
    }
}

/// Whether a key belongs to the reserved synthetic namespace.
///
/// User-supplied examples never receive one of these keys.
pub fn is_reserved_example_key(key: &str) -> bool {
    match key.strip_prefix("Standard") {
        Some("Unauthorized" | "Forbidden" | "ValidationError" | "InternalServerError") => true,
        Some(digits) => {
            !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
                && digits.parse::<u16>().is_ok_and(is_valid_status_code)
        }
        None => false,
    }
}

/// Key given to a singular `example` before disambiguation.
fn generated_example_key(status_code: u16) -> String {
    format!("Example{status_code}")
}

/// First free key of the form `base`, `base_2`, `base_3`, ...
///
/// `base` itself is skipped when it is reserved.
fn unique_key(examples: &Examples, base: &str) -> String {
    if !examples.contains_key(base) && !is_reserved_example_key(base) {
        return base.to_string();
    }
    let mut i = 2;
    loop {
        let key = format!("{base}_{i}");
        if !examples.contains_key(&key) {
            return key;
        }
        i += 1;
    }
}

/// Insert a caller-supplied example, never overwriting an existing one.
fn insert_user_example(status_code: u16, examples: &mut Examples, key: &str, example: Example) -> String {
    let assigned = unique_key(examples, key);
    if assigned != key {
        tracing::debug!(status_code, key, assigned = %assigned, "example key disambiguated");
    }
    examples.insert(assigned.clone(), example);
    assigned
}

/// Per-status working state. Descriptions are kept per source until `finish`.
#[derive(Debug, Clone, Default)]
struct WorkingFragment {
    raw_description: Option<String>,
    protocol_description: Option<String>,
    synthetic_description: Option<String>,
    content: IndexMap<String, MediaTypeContent>,
    extra: Map<String, Value>,
}

impl WorkingFragment {
    fn media(&mut self, media_type: &str) -> &mut MediaTypeContent {
        self.content.entry(media_type.to_string()).or_default()
    }

    fn into_fragment(self) -> ResponseFragment {
        let description = self
            .raw_description
            .or(self.protocol_description)
            .or(self.synthetic_description);
        ResponseFragment {
            description,
            content: self.content,
            extra: self.extra,
        }
    }
}

/// Accumulates error responses from raw fragments, error DTOs and standard flags.
///
/// # Conflict Resolution
///
/// - **Examples**: never overwritten. The first source keeps its key; later sources
///   with the same key get `key_2`, `key_3`, ... Reserved synthetic keys are only ever
///   given to flag-derived entries.
/// - **Descriptions**: raw fragments win over error DTOs, which win over flags. Within
///   one kind of source, the first non-empty description wins. Contribution order
///   does not change this.
///
/// Callers are expected to check status codes with [`is_valid_status_code`] first.
#[derive(Debug, Clone, Default)]
pub struct ResponseMerger {
    fragments: IndexMap<u16, WorkingFragment>,
}

impl ResponseMerger {
    /// Create an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    fn working(&mut self, status_code: u16) -> &mut WorkingFragment {
        self.fragments.entry(status_code).or_default()
    }

    /// Merge one raw response object (`{"description": ..., "content": {...}}`).
    ///
    /// A singular `example` becomes a named example under a generated key. Plural
    /// `examples` keep their keys unless they collide. Unknown fields are kept, first
    /// seen wins.
    pub fn merge_raw_fragment(&mut self, status_code: u16, fragment: &Value) -> Result<()> {
        let path = format!("/{status_code}");
        let fields = fragment
            .as_object()
            .ok_or_else(|| AggregateError::malformed(status_code, &path, "expected a response object"))?;

        let working = self.working(status_code);
        for (field, value) in fields {
            match field.as_str() {
                "description" => match value {
                    Value::String(description) => {
                        if working.raw_description.is_none() && !description.is_empty() {
                            working.raw_description = Some(description.clone());
                        }
                    }
                    Value::Null => {}
                    _ => {
                        return Err(AggregateError::malformed(
                            status_code,
                            format!("{path}/description"),
                            "expected a string",
                        ));
                    }
                },
                "content" => {
                    let content = value.as_object().ok_or_else(|| {
                        AggregateError::malformed(status_code, format!("{path}/content"), "expected an object")
                    })?;
                    for (media_type, body) in content {
                        merge_media_type(status_code, working.media(media_type), media_type, body)?;
                    }
                }
                _ => {
                    working.extra.entry(field.clone()).or_insert_with(|| value.clone());
                }
            }
        }

        tracing::debug!(status_code, "merged raw response fragment");
        Ok(())
    }

    /// Merge the examples of one error DTO under `application/json`.
    pub fn merge_protocol(&mut self, status_code: u16, message: impl Into<String>, examples: Examples) {
        let message = message.into();
        let working = self.working(status_code);
        if working.protocol_description.is_none() && !message.is_empty() {
            working.protocol_description = Some(message);
        }

        let target = &mut working.media(DEFAULT_MEDIA_TYPE).examples;
        for (key, example) in examples {
            insert_user_example(status_code, target, &key, example);
        }
        tracing::debug!(status_code, "merged error DTO");
    }

    /// Merge a flag-derived entry under its reserved key.
    ///
    /// Merging the same entry twice is a no-op.
    pub fn merge_synthetic(
        &mut self,
        status_code: u16,
        description: impl Into<String>,
        key: impl Into<String>,
        value: Value,
    ) {
        let key = key.into();
        let working = self.working(status_code);
        working.synthetic_description.get_or_insert_with(|| description.into());

        let example = Example::new(value);
        let target = &mut working.media(DEFAULT_MEDIA_TYPE).examples;
        match target.get(&key).map(|existing| *existing == example) {
            Some(true) => {}
            Some(false) => {
                let assigned = unique_key(target, &key);
                target.insert(assigned, example);
            }
            None => {
                target.insert(key, example);
            }
        }
        tracing::debug!(status_code, "merged standard error");
    }

    /// Number of status codes merged so far.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether nothing has been merged yet.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Apply description precedence and produce the final responses.
    pub fn finish(self) -> Responses {
        self.fragments
            .into_iter()
            .map(|(status, working)| (status, working.into_fragment()))
            .collect::<IndexMap<_, _>>()
            .into()
    }
}

fn merge_media_type(status_code: u16, target: &mut MediaTypeContent, media_type: &str, body: &Value) -> Result<()> {
    let path = format!("/{status_code}/content/{media_type}");
    let fields = body
        .as_object()
        .ok_or_else(|| AggregateError::malformed(status_code, &path, "expected a media type object"))?;

    if fields.contains_key("example") && fields.contains_key("examples") {
        return Err(AggregateError::malformed(
            status_code,
            &path,
            "`example` and `examples` are mutually exclusive",
        ));
    }

    for (field, value) in fields {
        match field.as_str() {
            "example" => {
                let base = generated_example_key(status_code);
                insert_user_example(status_code, &mut target.examples, &base, Example::new(value.clone()));
            }
            "examples" => {
                let entries = value.as_object().ok_or_else(|| {
                    AggregateError::malformed(status_code, format!("{path}/examples"), "expected an object")
                })?;
                for (key, entry) in entries {
                    let example = parse_example(status_code, &format!("{path}/examples/{key}"), entry)?;
                    insert_user_example(status_code, &mut target.examples, key, example);
                }
            }
            _ => {
                target.extra.entry(field.clone()).or_insert_with(|| value.clone());
            }
        }
    }
    Ok(())
}

/// Parse a `{"value": ..., "summary"?: ..., "description"?: ...}` entry.
///
/// Any other field is kept in [`Example::extra`].
fn parse_example(status_code: u16, path: &str, entry: &Value) -> Result<Example> {
    let fields = entry
        .as_object()
        .ok_or_else(|| AggregateError::malformed(status_code, path, "expected an example object with `value`"))?;
    let value = fields
        .get("value")
        .ok_or_else(|| AggregateError::malformed(status_code, path, "example is missing its `value` wrapper"))?;

    let text = |name: &str| -> Result<Option<String>> {
        match fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(AggregateError::malformed(
                status_code,
                format!("{path}/{name}"),
                "expected a string",
            )),
        }
    };

    let extra = fields
        .iter()
        .filter(|(name, _)| !matches!(name.as_str(), "value" | "summary" | "description"))
        .map(|(name, field)| (name.clone(), field.clone()))
        .collect();

    Ok(Example {
        value: value.clone(),
        summary: text("summary")?,
        description: text("description")?,
        extra,
    })
}
