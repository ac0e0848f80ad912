//! Tests for the Errors aggregator.

use errors_plus::{AggregateError, BaseErrorDto, ErrorDto, Errors, Example, Examples, RawDescriptor, StandardErrorDto, errors};
use serde_json::json;

fn example_keys(responses: &errors_plus::Responses, status: u16) -> Vec<String> {
    responses[status]
        .json_examples()
        .map(|examples| examples.keys().cloned().collect())
        .unwrap_or_default()
}

// ============================================================================
// Standard Flags
// ============================================================================

#[test]
fn test_unauthorized_flag() {
    let responses = errors![; unauthorized = true].unwrap();

    assert!(responses.contains(401));
    assert_eq!(responses[401].description.as_deref(), Some("Unauthorized"));
    assert_eq!(
        responses[401].json_examples().unwrap()["StandardUnauthorized"].value,
        json!({"detail": "Unauthorized"})
    );
}

#[test]
fn test_forbidden_flag() {
    let responses = errors![; forbidden_403 = true].unwrap();
    assert_eq!(responses[403].description.as_deref(), Some("Forbidden"));
    assert_eq!(example_keys(&responses, 403), vec!["StandardForbidden"]);
}

#[test]
fn test_internal_server_error_flag() {
    let responses = errors![; internal_server_error = true].unwrap();
    assert_eq!(responses[500].description.as_deref(), Some("Internal Server Error"));
    assert_eq!(example_keys(&responses, 500), vec!["StandardInternalServerError"]);
}

#[test]
fn test_multiple_flags() {
    let responses = errors![;
        unauthorized = true,
        forbidden = true,
        validation_error = true,
        internal_server_error = true,
    ]
    .unwrap();

    assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![401, 403, 422, 500]);
}

#[test]
fn test_validation_error_default_and_opt_out() {
    let responses = errors![].unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[422].description.as_deref(), Some("Validation Error"));
    assert_eq!(
        responses[422].json_examples().unwrap()["StandardValidationError"].value,
        json!({"detail": "Validation error"})
    );

    assert!(errors![; validation_error = false].unwrap().is_empty());
    assert!(errors![; validation_error_422 = false].unwrap().is_empty());
    assert!(errors![; validation_error = false, validation_error_422 = true].unwrap().contains(422));
    assert!(errors![; validation_error = None::<bool>].unwrap().contains(422));
}

// ============================================================================
// Raw Fragments
// ============================================================================

#[test]
fn test_single_dict_error() {
    let responses = errors![
        json!({"404": {
            "description": "Not found",
            "content": {"application/json": {"example": {"detail": "Item not found"}}}
        }});
        validation_error_422 = false,
    ]
    .unwrap();

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[404].description.as_deref(), Some("Not found"));
    assert_eq!(example_keys(&responses, 404), vec!["Example404"]);
}

#[test]
fn test_multiple_dict_errors() {
    let responses = errors![
        json!({"404": {"description": "Not found"}}),
        json!({"409": {"description": "Conflict"}});
        validation_error = false,
    ]
    .unwrap();

    assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![404, 409]);
}

#[test]
fn test_dict_with_examples() {
    let raw = RawDescriptor::status(401)
        .description("Unauthorized")
        .named_example("application/json", "InvalidToken", json!({"detail": "Token could not be decoded."}))
        .named_example("application/json", "SessionNotFound", json!({"detail": "Session was not found."}));
    let responses = Errors::new().raw(raw).build().unwrap();

    assert_eq!(example_keys(&responses, 401), vec!["InvalidToken", "SessionNotFound"]);
}

#[test]
fn test_dict_other_media_type() {
    let responses = errors![json!({"406": {
        "description": "Not acceptable",
        "content": {"text/plain": {"example": "nope"}}
    }})]
    .unwrap();

    let examples = responses[406].examples("text/plain").unwrap();
    assert_eq!(examples["Example406"].value, json!("nope"));
    assert!(responses[406].json_examples().is_none());
}

#[test]
fn test_duplicate_dict_same_status_first_description_wins() {
    // First-seen wins for competing raw descriptions. Callers may depend on this.
    let responses = errors![
        json!({"404": {"description": "First", "content": {"application/json": {"example": {"detail": "a"}}}}}),
        json!({"404": {"description": "Second", "content": {"application/json": {"example": {"detail": "b"}}}}}),
    ]
    .unwrap();

    assert_eq!(responses[404].description.as_deref(), Some("First"));
    assert_eq!(example_keys(&responses, 404), vec!["Example404", "Example404_2"]);
}

// ============================================================================
// Error DTOs
// ============================================================================

#[test]
fn test_single_error_dto() {
    let responses = errors![BaseErrorDto::new(404, "Not found")].unwrap();

    assert_eq!(responses[404].description.as_deref(), Some("Not found"));
    assert_eq!(example_keys(&responses, 404), vec!["Not found"]);
}

#[test]
fn test_merge_error_dto_same_status() {
    let responses = errors![BaseErrorDto::new(404, "Error 1"), BaseErrorDto::new(404, "Error 2")].unwrap();

    assert_eq!(example_keys(&responses, 404), vec!["Error 1", "Error 2"]);
    assert_eq!(responses[404].description.as_deref(), Some("Error 1"));
}

#[test]
fn test_standard_error_dto_examples() {
    let unauthorized = StandardErrorDto::new(401, "Unauthorized")
        .with_example("InvalidToken", "Token could not be decoded.")
        .with_example("SessionNotFound", "Session was not found.");
    let responses = errors![unauthorized; unauthorized_401 = true].unwrap();

    assert_eq!(
        example_keys(&responses, 401),
        vec!["StandardUnauthorized", "InvalidToken", "SessionNotFound"]
    );
}

#[derive(Debug, thiserror::Error)]
enum ItemError {
    #[error("Item not found")]
    NotFound,
    #[error("Item is locked")]
    Locked,
}

impl ErrorDto for ItemError {
    fn status_code(&self) -> u16 {
        match self {
            ItemError::NotFound => 404,
            ItemError::Locked => 423,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn to_example(&self) -> Examples {
        Examples::from([(self.message(), Example::detail(self.message()))])
    }
}

#[test]
fn test_domain_error_enum() {
    let responses = errors![ItemError::NotFound, ItemError::Locked; validation_error = false].unwrap();

    assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![404, 423]);
    assert_eq!(responses[423].description.as_deref(), Some("Item is locked"));
}

#[test]
fn test_boxed_dtos() {
    let dtos: Vec<Box<dyn ErrorDto>> = vec![Box::new(ItemError::NotFound), Box::new(BaseErrorDto::new(409, "Conflict"))];
    let responses = Errors::aggregate(dtos, Default::default()).unwrap();
    assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![422, 404, 409]);
}

// ============================================================================
// Mixed Sources
// ============================================================================

#[test]
fn test_merge_flag_and_dict_same_status() {
    let responses = errors![
        json!({"401": {
            "description": "Authentication required",
            "content": {"application/json": {"examples": {
                "InvalidToken": {"value": {"detail": "Invalid token"}}
            }}}
        }});
        unauthorized_401 = true,
    ]
    .unwrap();

    assert_eq!(responses[401].description.as_deref(), Some("Authentication required"));
    assert_eq!(example_keys(&responses, 401), vec!["StandardUnauthorized", "InvalidToken"]);
}

#[test]
fn test_merge_flag_and_error_dto_same_status() {
    let responses = errors![BaseErrorDto::new(401, "Token expired"); unauthorized = true].unwrap();

    assert_eq!(responses[401].description.as_deref(), Some("Token expired"));
    assert_eq!(example_keys(&responses, 401), vec!["StandardUnauthorized", "Token expired"]);
}

#[test]
fn test_mixed_flags_dict_error_dto() {
    let responses = errors![
        json!({"409": {"description": "Conflict"}}),
        BaseErrorDto::new(404, "Not found");
        unauthorized = true,
        forbidden_403 = true,
        validation_error_422 = false,
    ]
    .unwrap();

    assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![401, 403, 409, 404]);
}

#[test]
fn test_user_cannot_claim_reserved_key() {
    let responses = errors![json!({"403": {"content": {"application/json": {"examples": {
        "StandardForbidden": {"value": {"detail": "mine"}}
    }}}}})]
    .unwrap();

    assert_eq!(example_keys(&responses, 403), vec!["StandardForbidden_2"]);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_json_dto_passes() {
    let responses = errors![json!({
        "status_code": 404,
        "message": "Not found",
        "to_example": {"Not found": {"value": {"detail": "Not found"}}}
    })]
    .unwrap();
    assert!(responses.contains(404));
}

#[test]
fn test_missing_to_example() {
    let err = errors![json!({"status_code": 404, "message": "Not found"})].unwrap_err();

    let text = err.to_string();
    assert!(text.contains("to_example"), "{text}");
    assert!(matches!(err, AggregateError::Configuration { ref missing, .. } if missing == &["to_example"]));
}

#[test]
fn test_missing_status_code_and_message() {
    let err = errors![json!({"to_example": {"x": {"value": 1}}})].unwrap_err();
    assert!(matches!(
        err,
        AggregateError::Configuration { ref missing, .. } if missing == &["status_code", "message"]
    ));
}

#[test]
fn test_multiple_missing_attributes_reported() {
    let err = errors![BaseErrorDto::new(404, "ok"), json!({"name": "BadObject"})].unwrap_err();

    let text = err.to_string();
    assert!(text.contains("position 1"));
    assert!(text.contains("status_code"));
    assert!(text.contains("message"));
    assert!(text.contains("to_example"));
}

#[test]
fn test_string_rejected() {
    let err = errors![json!("Not found")].unwrap_err();
    let text = err.to_string();
    assert!(text.contains("string"));
    assert!(text.contains("status_code"));
}

#[test]
fn test_example_without_value_wrapper() {
    let err = errors![json!({"404": {"content": {"application/json": {"examples": {
        "a": {"detail": "x"}
    }}}}})]
    .unwrap_err();

    assert!(matches!(
        err,
        AggregateError::MalformedFragment { status_code: 404, ref path, .. }
            if path == "/404/content/application/json/examples/a"
    ));
}

#[test]
fn test_invalid_status_codes() {
    assert!(errors![json!({"42": {}})].is_err());
    assert!(errors![json!({"600": {}})].is_err());
    assert!(errors![BaseErrorDto::new(1000, "nope")].is_err());
    assert!(errors![RawDescriptor::status(99)].is_err());
}
