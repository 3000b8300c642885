//! Request description and call outcome types.
//!
//! # Design
//! `RequestSpec` is constructed per call and only ever borrowed by the
//! executor, so the body template cannot be mutated by a call and the same
//! spec can be replayed. `CallResult` is an enum so exactly one of the
//! success/failure shapes exists; it serializes to the flat
//! `{"success": .., "status": .., "data"|"error": ..}` record consumed by
//! the presentation layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::HttpMethod;

/// Declarative description of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub url: String,
    pub method: HttpMethod,
    pub keyword: String,
    pub keyword_param: String,
    pub headers: Option<BTreeMap<String, String>>,
    /// Base POST body. Ignored for GET.
    pub body_template: Option<Map<String, Value>>,
}

impl RequestSpec {
    pub fn new(
        method: HttpMethod,
        url: impl Into<String>,
        keyword_param: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            method,
            keyword: keyword.into(),
            keyword_param: keyword_param.into(),
            headers: None,
            body_template: None,
        }
    }

    pub fn get(url: impl Into<String>, keyword_param: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url, keyword_param, keyword)
    }

    pub fn post(url: impl Into<String>, keyword_param: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url, keyword_param, keyword)
    }

    pub fn with_headers(mut self, headers: Option<BTreeMap<String, String>>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body_template(mut self, template: Option<Map<String, Value>>) -> Self {
        self.body_template = template;
        self
    }
}

/// Normalized outcome of one API invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "CallRecord", try_from = "CallRecord")]
pub enum CallResult {
    Success { status: u16, data: Value },
    /// `status` is set only when the server answered with a non-2xx code.
    Failure { error: String, status: Option<u16> },
}

impl CallResult {
    pub fn success(status: u16, data: Value) -> Self {
        CallResult::Success { status, data }
    }

    pub fn failure(error: impl Into<String>, status: Option<u16>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "request failed".to_string()
        } else {
            error
        };
        CallResult::Failure { error, status }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CallResult::Success { status, .. } => Some(*status),
            CallResult::Failure { status, .. } => *status,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            CallResult::Success { data, .. } => Some(data),
            CallResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CallResult::Success { .. } => None,
            CallResult::Failure { error, .. } => Some(error),
        }
    }
}

/// Flat wire shape of a `CallResult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CallRecord {
    success: bool,
    status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<CallResult> for CallRecord {
    fn from(result: CallResult) -> Self {
        match result {
            CallResult::Success { status, data } => CallRecord {
                success: true,
                status: Some(status),
                data: Some(data),
                error: None,
            },
            CallResult::Failure { error, status } => CallRecord {
                success: false,
                status,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<CallRecord> for CallResult {
    type Error = String;

    fn try_from(record: CallRecord) -> Result<Self, Self::Error> {
        if record.success {
            let status = record.status.ok_or("successful call record without status")?;
            Ok(CallResult::Success {
                status,
                data: record.data.unwrap_or(Value::Null),
            })
        } else {
            let error = record.error.ok_or("failed call record without error")?;
            Ok(CallResult::Failure {
                error,
                status: record.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_to_flat_record() {
        let result = CallResult::success(200, json!({"hits": 3}));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({"success": true, "status": 200, "data": {"hits": 3}}));
    }

    #[test]
    fn success_with_null_data_keeps_data_field() {
        let value = serde_json::to_value(CallResult::success(200, Value::Null)).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.as_object().unwrap().contains_key("data"));
    }

    #[test]
    fn failure_serializes_without_data() {
        let result = CallResult::failure("transport error: refused", None);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "status": null, "error": "transport error: refused"})
        );
    }

    #[test]
    fn failure_message_is_never_empty() {
        let result = CallResult::failure("  ", None);
        assert_eq!(result.error(), Some("request failed"));
    }

    #[test]
    fn record_roundtrips_through_json() {
        let result = CallResult::failure("HTTP 500 Internal Server Error", Some(500));
        let json = serde_json::to_string(&result).unwrap();
        let back: CallResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn record_without_error_is_rejected() {
        let result: Result<CallResult, _> = serde_json::from_str(r#"{"success":false,"status":null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn accessors_follow_shape() {
        let ok = CallResult::success(201, json!([1]));
        assert!(ok.is_success());
        assert_eq!(ok.status(), Some(201));
        assert_eq!(ok.data(), Some(&json!([1])));
        assert!(ok.error().is_none());

        let err = CallResult::failure("boom", Some(404));
        assert!(!err.is_success());
        assert_eq!(err.status(), Some(404));
        assert!(err.data().is_none());
    }
}
