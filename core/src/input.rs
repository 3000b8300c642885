//! Lenient parsing of caller-supplied JSON strings.
//!
//! Headers and body templates arrive as free-form JSON text. Blank or
//! malformed input degrades to "absent" instead of failing the call; all of
//! that policy lives in `parse_json_lenient` so a stricter mode only has to
//! change this module.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

/// Parse `raw` as JSON, or `None` if it is blank or malformed.
pub fn parse_json_lenient(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "ignoring malformed JSON input");
            None
        }
    }
}

/// Parse `raw` as a JSON object; any other JSON type counts as absent.
pub fn parse_json_object_lenient(raw: &str) -> Option<Map<String, Value>> {
    match parse_json_lenient(raw)? {
        Value::Object(map) => Some(map),
        other => {
            warn!(kind = json_kind(&other), "ignoring JSON input that is not an object");
            None
        }
    }
}

/// Parse a header mapping. String values are kept as-is, numbers and booleans
/// are rendered as text, and `null`, arrays and objects are dropped.
pub fn parse_headers_lenient(raw: &str) -> Option<BTreeMap<String, String>> {
    let map = parse_json_object_lenient(raw)?;
    let headers = map
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(s) => Some((name, s)),
            Value::Number(n) => Some((name, n.to_string())),
            Value::Bool(b) => Some((name, b.to_string())),
            other => {
                warn!(header = %name, kind = json_kind(&other), "dropping non-scalar header value");
                None
            }
        })
        .collect();
    Some(headers)
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_input_is_absent() {
        assert_eq!(parse_json_lenient(""), None);
        assert_eq!(parse_json_lenient("  \n"), None);
    }

    #[test]
    fn malformed_input_is_absent() {
        assert_eq!(parse_json_lenient("{\"a\": "), None);
        assert_eq!(parse_json_object_lenient("not json"), None);
        assert_eq!(parse_headers_lenient("{'single': 'quotes'}"), None);
    }

    #[test]
    fn non_object_is_absent_for_templates() {
        assert_eq!(parse_json_object_lenient("[1, 2]"), None);
        assert_eq!(parse_json_object_lenient("\"text\""), None);
    }

    #[test]
    fn template_roundtrips_structurally() {
        let template = json!({"size": 10, "filters": {"lang": ["ko", "en"]}, "exact": false});
        let encoded = serde_json::to_string(&template).unwrap();
        let decoded = parse_json_object_lenient(&encoded).unwrap();
        assert_eq!(Value::Object(decoded), template);
    }

    #[test]
    fn header_values_are_stringified() {
        let headers = parse_headers_lenient(
            r#"{"Authorization": "Bearer t", "X-Retry": 3, "X-Debug": true, "X-Nested": {"a": 1}, "X-Null": null}"#,
        )
        .unwrap();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers["Authorization"], "Bearer t");
        assert_eq!(headers["X-Retry"], "3");
        assert_eq!(headers["X-Debug"], "true");
    }

    #[test]
    fn empty_object_is_present_but_empty() {
        assert_eq!(parse_headers_lenient("{}"), Some(BTreeMap::new()));
    }
}
