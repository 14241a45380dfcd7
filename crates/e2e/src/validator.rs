//! Response validator
//!
//! Assert-only inspection of one completed response. Every check panics
//! with an expected-vs-actual message on violation, so a failure reads
//! as a test assertion rather than a recoverable error. Checks are
//! independent statements; one failing check never suppresses another
//! check type elsewhere in the test body.

use serde_json::Value;

use crate::client::ApiResponse;

/// Substring every JSON response's Content-Type must carry
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Soft latency budget in milliseconds
pub const DEFAULT_MAX_RESPONSE_TIME_MS: u128 = 200;

/// Expected runtime kind of a top-level body field.
///
/// Matching is exact: a numeric string never satisfies `Integer`, and
/// `Integer` only accepts numbers without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
    Null,
}

impl JsonKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            JsonKind::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            JsonKind::Number => value.is_number(),
            JsonKind::String => value.is_string(),
            JsonKind::Boolean => value.is_boolean(),
            JsonKind::Array => value.is_array(),
            JsonKind::Object => value.is_object(),
            JsonKind::Null => value.is_null(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            JsonKind::Integer => "integer",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Boolean => "boolean",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
            JsonKind::Null => "null",
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validator over one decoded response
pub struct ResponseValidator<'a> {
    response: &'a ApiResponse,
    data: Value,
}

impl<'a> ResponseValidator<'a> {
    /// Decode the body eagerly; a non-JSON body fails here, before any
    /// individual check runs.
    pub fn new(response: &'a ApiResponse) -> Self {
        let data = match response.json() {
            Ok(data) => data,
            Err(err) => panic!("response body is not valid JSON: {}", err),
        };
        Self { response, data }
    }

    /// The decoded body
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Content-Type must exist and contain `application/json`
    pub fn validate_response_headers(&self) {
        self.validate_content_type(DEFAULT_CONTENT_TYPE);
    }

    pub fn validate_content_type(&self, expected_content_type: &str) {
        let actual = self.response.header("Content-Type");
        assert!(
            actual.is_some_and(|v| v.contains(expected_content_type)),
            "Expected Content-Type: {}, but got: {:?}",
            expected_content_type,
            actual
        );
    }

    /// Latency within the default 200 ms budget
    pub fn validate_response_time(&self) {
        self.validate_response_time_within(DEFAULT_MAX_RESPONSE_TIME_MS);
    }

    /// Latency within a caller-chosen budget. A soft performance check,
    /// not a correctness check.
    pub fn validate_response_time_within(&self, max_response_time_ms: u128) {
        let elapsed_ms = self.response.elapsed_ms();
        assert!(
            elapsed_ms <= max_response_time_ms,
            "Expected <= {} ms, but got {} ms",
            max_response_time_ms,
            elapsed_ms
        );
    }

    /// Every listed field must exist with exactly the expected kind
    pub fn validate_data_type(&self, field_validations: &[(&str, JsonKind)]) {
        for (field, expected) in field_validations {
            let value = match self.data.get(field) {
                Some(value) => value,
                None => panic!("Missing field: {}", field),
            };
            assert!(
                expected.matches(value),
                "Expected '{}' to be type {}, got {}",
                field,
                expected.name(),
                kind_name(value)
            );
        }
    }

    /// Every field of the expected object must deep-equal the body's
    pub fn validate_field_value(&self, field_validations: &Value) {
        let expected_fields = field_validations
            .as_object()
            .expect("expected field values must be a JSON object");
        for (field, expected) in expected_fields {
            let actual = self.data.get(field);
            assert!(
                actual == Some(expected),
                "Expected '{}' = {}, got {}",
                field,
                expected,
                actual.map_or_else(|| "<missing>".to_string(), Value::to_string)
            );
        }
    }

    /// Validate the full body against a JSON Schema document
    pub fn validate_json_schema(&self, schema: &Value) {
        let validator = match jsonschema::validator_for(schema) {
            Ok(validator) => validator,
            Err(err) => panic!("schema failed to compile: {}", err),
        };
        let error_msg = validator
            .iter_errors(&self.data)
            .next()
            .map(|err| err.to_string());
        if let Some(msg) = error_msg {
            panic!("JSON Schema validation error: {}", msg);
        }
    }
}
