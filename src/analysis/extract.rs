use serde_json::Value;
use crate::errors::ClarityError;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Object => ('{', '}'),
            JsonShape::Array => ('[', ']'),
        }
    }

    fn label(self) -> &'static str {
        match self {
            JsonShape::Object => "object",
            JsonShape::Array => "array",
        }
    }
}

/// Locate the JSON span embedded in free-form provider text.
///
/// Returns the slice from the first opening delimiter to the last closing
/// one, inclusive. This is a greedy first-to-last match, not a bracket
/// balance scan: prose containing stray braces after the JSON will widen the
/// span and make it fail to parse. Callers rely on that behaviour staying
/// loose.
pub fn extract_first_json_span(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (start < end).then(|| &text[start..=end])
}

/// Extract and parse the embedded JSON, failing with `ClarityError::Parse`.
pub fn parse_json_span(text: &str, shape: JsonShape) -> Result<Value, ClarityError> {
    let span = extract_first_json_span(text, shape).ok_or_else(|| {
        ClarityError::Parse(format!("No JSON {} found in provider response", shape.label()))
    })?;
    serde_json::from_str(span)
        .map_err(|e| ClarityError::Parse(format!("Invalid JSON {} in provider response: {}", shape.label(), e)))
}

/// Shallow merge of a parsed value over a route default.
///
/// Object fields present in `parsed` replace the default's field wholesale;
/// `null` counts as absent. A parsed field whose JSON type contradicts the
/// default's keeps the default, except numbers and booleans which are
/// stringified where the default is a string. Arrays replace arrays. Any
/// other mismatch returns the default untouched.
pub fn merge_over_default(default: Value, parsed: Value) -> Value {
    match (default, parsed) {
        (Value::Object(mut base), Value::Object(fields)) => {
            for (key, value) in fields {
                if value.is_null() {
                    continue;
                }
                let merged = match base.get(&key) {
                    Some(existing) => match conform(existing, value) {
                        Some(v) => v,
                        None => continue,
                    },
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (Value::Array(_), Value::Array(items)) => Value::Array(items),
        (default, _) => default,
    }
}

fn conform(existing: &Value, value: Value) -> Option<Value> {
    match (existing, value) {
        (Value::String(_), Value::Number(n)) => Some(Value::String(n.to_string())),
        (Value::String(_), Value::Bool(b)) => Some(Value::String(b.to_string())),
        (Value::Null, v) => Some(v),
        (e, v) if same_kind(e, &v) => Some(v),
        _ => None,
    }
}

fn same_kind(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

/// Parse provider text for a non-fatal route. Any failure is logged and the
/// default comes back unchanged.
pub fn parse_or_default(route: &str, text: &str, shape: JsonShape, default: Value) -> Value {
    match parse_json_span(text, shape) {
        Ok(parsed) => {
            debug!(route, "Parsed JSON from provider response");
            merge_over_default(default, parsed)
        }
        Err(e) => {
            warn!(route, error = %e, response_len = text.len(), "Falling back to default payload");
            default
        }
    }
}

/// Merge `value` over `default` when both are objects; otherwise `default`.
pub fn rewrap(value: Option<&Value>, default: Value) -> Value {
    match value {
        Some(v @ Value::Object(_)) => merge_over_default(default, v.clone()),
        _ => default,
    }
}
