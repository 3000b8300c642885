//! Harness configuration: one request description per system under test,
//! plus an optional keyword source, loaded from TOML.
//!
//! ```toml
//! [keywords]
//! text = "rust tutorial, machine learning"
//! delimiter = ","
//!
//! [system_a]
//! method = "GET"
//! url = "https://a.example.com/search"
//! json_path = "data.results.0.title"
//!
//! [system_b]
//! method = "POST"
//! url = "https://b.example.com/search"
//! keyword_param = "q"
//! headers = '{"Authorization": "Bearer token"}'
//! body = '{"size": 10}'
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::HttpMethod;
use crate::input::{parse_headers_lenient, parse_json_object_lenient};
use crate::keywords::KeywordSource;
use crate::types::RequestSpec;

pub const DEFAULT_KEYWORD_PARAM: &str = "query";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Which of the two systems under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemId {
    A,
    B,
}

impl SystemId {
    pub const ALL: [SystemId; 2] = [SystemId::A, SystemId::B];
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemId::A => f.write_str("System A"),
            SystemId::B => f.write_str("System B"),
        }
    }
}

/// Request settings for one system, as the user enters them.
///
/// `headers` and `body` are raw JSON text; they are parsed leniently when a
/// `RequestSpec` is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub method: HttpMethod,
    pub url: String,
    #[serde(default = "default_keyword_param")]
    pub keyword_param: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    /// Body template, POST only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
}

fn default_keyword_param() -> String {
    DEFAULT_KEYWORD_PARAM.to_string()
}

impl SystemConfig {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            keyword_param: default_keyword_param(),
            headers: None,
            body: None,
            json_path: None,
        }
    }

    /// Derive the request for `keyword`. Malformed header or body JSON is
    /// treated as absent.
    pub fn request_spec(&self, keyword: &str) -> RequestSpec {
        let headers = self.headers.as_deref().and_then(parse_headers_lenient);
        let body_template = match self.method {
            HttpMethod::Post => self.body.as_deref().and_then(parse_json_object_lenient),
            HttpMethod::Get => None,
        };
        RequestSpec::new(self.method, self.url.trim(), &self.keyword_param, keyword)
            .with_headers(headers)
            .with_body_template(body_template)
    }

    /// Non-blank extraction path, if any.
    pub fn json_path(&self) -> Option<&str> {
        self.json_path.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordSource>,
    pub system_a: SystemConfig,
    pub system_b: SystemConfig,
}

impl HarnessConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn system(&self, id: SystemId) -> &SystemConfig {
        match id {
            SystemId::A => &self.system_a,
            SystemId::B => &self.system_b,
        }
    }
}
