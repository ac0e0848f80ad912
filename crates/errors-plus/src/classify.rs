//! Descriptor classification and validation.
//!
//! Every positional descriptor is checked here before anything is merged, so a bad
//! argument fails the whole call.

use errors_plus_core::{Descriptor, ErrorDto, Example, Examples};
use errors_plus_openapi::{AggregateError, Result, is_valid_status_code};
use serde_json::{Map, Value};

const FACETS_MESSAGE: &str = "error DTO must have status_code, message attributes and to_example() method";

/// A validated descriptor, ready to merge.
#[derive(Debug)]
pub(crate) enum Contribution {
    Raw(Vec<(u16, Value)>),
    Protocol {
        status_code: u16,
        message: String,
        examples: Examples,
    },
}

/// Classify and validate the descriptor at `position`.
pub(crate) fn classify(position: usize, descriptor: Descriptor) -> Result<Contribution> {
    match descriptor {
        Descriptor::Raw(raw) => {
            let fragments = raw.into_fragments();
            for (status_code, _) in &fragments {
                check_status_code(position, "RawDescriptor", i64::from(*status_code))?;
            }
            Ok(Contribution::Raw(fragments))
        }
        Descriptor::Protocol(dto) => classify_dto(position, &*dto),
        Descriptor::Json(value) => classify_json(position, value),
    }
}

fn check_status_code(position: usize, type_name: &str, status_code: i64) -> Result<u16> {
    u16::try_from(status_code)
        .ok()
        .filter(|code| is_valid_status_code(*code))
        .ok_or_else(|| {
            AggregateError::configuration(
                position,
                type_name,
                Vec::new(),
                format!("status code {status_code} is outside 100-599"),
            )
        })
}

fn classify_dto(position: usize, dto: &dyn ErrorDto) -> Result<Contribution> {
    let status_code = dto.status_code();
    let examples = dto.to_example();

    let mut missing = Vec::new();
    if !is_valid_status_code(status_code) {
        missing.push("status_code");
    }
    if examples.is_empty() {
        missing.push("to_example");
    }
    if !missing.is_empty() {
        return Err(AggregateError::configuration(
            position,
            dto.type_name(),
            missing,
            format!("status_code must be 100-599 (got {status_code}) and to_example() must return at least one example"),
        ));
    }

    Ok(Contribution::Protocol {
        status_code,
        message: dto.message(),
        examples,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn classify_json(position: usize, value: Value) -> Result<Contribution> {
    let Value::Object(fields) = value else {
        return Err(AggregateError::configuration(
            position,
            json_kind(&value),
            vec!["status_code", "message", "to_example"],
            format!("expected a status code mapping or an error DTO; {FACETS_MESSAGE}"),
        ));
    };

    let integer_keys = fields.keys().all(|key| is_status_key(key));
    if integer_keys {
        let mut fragments = Vec::with_capacity(fields.len());
        for (key, fragment) in fields {
            let status_code = key.parse::<i64>().map_err(|_| {
                AggregateError::configuration(position, "object", Vec::new(), format!("invalid status code `{key}`"))
            })?;
            fragments.push((check_status_code(position, "object", status_code)?, fragment));
        }
        return Ok(Contribution::Raw(fragments));
    }

    classify_json_dto(position, &fields)
}

/// Decimal digits, optionally after a `-` so negative codes reach the range check.
fn is_status_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a serialized error DTO, reporting every missing facet at once.
fn classify_json_dto(position: usize, fields: &Map<String, Value>) -> Result<Contribution> {
    let status_code = fields
        .get("status_code")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .filter(|code| is_valid_status_code(*code));
    let message = fields.get("message").and_then(Value::as_str);
    let examples = fields.get("to_example").and_then(parse_examples);

    match (status_code, message, examples) {
        (Some(status_code), Some(message), Some(examples)) => Ok(Contribution::Protocol {
            status_code,
            message: message.to_string(),
            examples,
        }),
        (status_code, message, examples) => {
            let mut missing = Vec::new();
            if status_code.is_none() {
                missing.push("status_code");
            }
            if message.is_none() {
                missing.push("message");
            }
            if examples.is_none() {
                missing.push("to_example");
            }
            Err(AggregateError::configuration(position, "object", missing, FACETS_MESSAGE))
        }
    }
}

/// A non-empty `{key: {"value": ...}}` object, or `None`.
fn parse_examples(value: &Value) -> Option<Examples> {
    let entries = value.as_object()?;
    if entries.is_empty() {
        return None;
    }
    entries
        .iter()
        .map(|(key, entry)| {
            let example: Example = serde_json::from_value(entry.clone()).ok()?;
            entry.get("value")?;
            Some((key.clone(), example))
        })
        .collect()
}
