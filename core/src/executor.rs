//! Request executor: derive one HTTP request from a `RequestSpec`, send it,
//! and normalize the outcome into a `CallResult`.
//!
//! # Design
//! The work is split into three steps. `build_request` is pure and produces
//! an `HttpRequest`; the `HttpTransport` performs the round trip;
//! `parse_response` is pure and interprets the `HttpResponse`. Each step
//! returns `ApiError` through `?`, and `Executor::execute` is the one place
//! where errors become values, so no failure escapes a call.

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{HttpTransport, UreqTransport};
use crate::types::{CallResult, RequestSpec};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Derive the outgoing request for `spec`.
///
/// GET sets exactly one `keyword_param=keyword` pair in the URL's query,
/// replacing any pair of that name already on the configured URL. POST clones the body template (or starts from `{}`), sets
/// `keyword_param` to the keyword and serializes it as JSON. The spec itself
/// is never modified.
pub fn build_request(spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
    let mut url = parse_endpoint(&spec.url)?;

    let mut headers = Vec::new();
    let body = match spec.method {
        HttpMethod::Get => {
            set_query_param(&mut url, &spec.keyword_param, &spec.keyword);
            None
        }
        HttpMethod::Post => {
            let mut body = spec.body_template.clone().unwrap_or_default();
            body.insert(spec.keyword_param.clone(), Value::String(spec.keyword.clone()));
            let body = serde_json::to_string(&Value::Object(body))
                .map_err(|e| ApiError::Serialization(e.to_string()))?;
            headers.push(("content-type".to_string(), JSON_CONTENT_TYPE.to_string()));
            Some(body)
        }
    };

    if let Some(custom) = &spec.headers {
        for (name, value) in custom {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }
    }

    Ok(HttpRequest {
        method: spec.method,
        url: url.into(),
        headers,
        body,
    })
}

/// Interpret a response: non-2xx is an error, a 2xx body must be JSON.
pub fn parse_response(response: HttpResponse) -> Result<(u16, Value), ApiError> {
    check_status(&response)?;
    let data = serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok((response.status, data))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        reason: response.reason.clone(),
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

/// Append `name=value`, dropping existing pairs called `name` first.
fn set_query_param(url: &mut Url, name: &str, value: &str) {
    if url.query_pairs().any(|(existing, _)| existing == name) {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(existing, _)| existing != name)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.set_query(None);
        if !kept.is_empty() {
            url.query_pairs_mut().extend_pairs(&kept);
        }
    }
    url.query_pairs_mut().append_pair(name, value);
}

fn parse_endpoint(raw: &str) -> Result<Url, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::InvalidRequest("endpoint URL is empty".to_string()));
    }
    let url = Url::parse(raw)
        .map_err(|e| ApiError::InvalidRequest(format!("endpoint URL {raw:?} is not absolute: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidRequest(format!(
            "unsupported URL scheme {other:?}, expected http or https"
        ))),
    }
}

/// Runs `RequestSpec`s through a transport, one request per call.
///
/// Holds no state besides the transport, so a single executor can be shared
/// by any number of callers.
#[derive(Debug, Clone, Default)]
pub struct Executor<T = UreqTransport> {
    transport: T,
}

impl Executor<UreqTransport> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: HttpTransport> Executor<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform the call described by `spec`. Never returns an error: every
    /// failure is folded into `CallResult::Failure`.
    pub fn execute(&self, spec: &RequestSpec) -> CallResult {
        match self.try_execute(spec) {
            Ok((status, data)) => {
                debug!(url = %spec.url, status, "call succeeded");
                CallResult::success(status, data)
            }
            Err(err) => {
                warn!(url = %spec.url, method = %spec.method, error = %err, "call failed");
                CallResult::failure(err.to_string(), err.status())
            }
        }
    }

    fn try_execute(&self, spec: &RequestSpec) -> Result<(u16, Value), ApiError> {
        let request = build_request(spec)?;
        let response = self.transport.send(&request)?;
        parse_response(response)
    }
}

/// Execute `spec` with the default transport and its 10 second timeout.
pub fn execute(spec: &RequestSpec) -> CallResult {
    Executor::new().execute(spec)
}
