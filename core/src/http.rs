//! HTTP request and response types described as plain data.
//!
//! # Design
//! `build_request` turns a `RequestSpec` into an `HttpRequest` and
//! `parse_response` consumes an `HttpResponse`, neither touching the network.
//! The transport in between is the only place that performs I/O, so request
//! derivation and response interpretation stay deterministic and testable
//! without a server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// HTTP method supported by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            other => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is final: for GET it already carries the keyword query pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `body` holds the raw bytes; decoding is left to `parse_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!(" Post ".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("PUT".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn method_serializes_uppercase() {
        assert_eq!(serde_json::to_value(HttpMethod::Post).unwrap(), "POST");
        let m: HttpMethod = serde_json::from_str(r#""GET""#).unwrap();
        assert_eq!(m, HttpMethod::Get);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Post,
            url: "http://localhost/search".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let mut resp = HttpResponse {
            status: 204,
            reason: String::new(),
            body: Vec::new(),
        };
        assert!(resp.is_success());
        resp.status = 301;
        assert!(!resp.is_success());
        resp.status = 199;
        assert!(!resp.is_success());
    }
}
