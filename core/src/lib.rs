//! Core of the search API comparison harness.
//!
//! # Overview
//! Performs one search call per `RequestSpec` against System A or System B
//! and extracts a value from the JSON response with a dotted path. Every
//! failure (bad URL, transport fault, non-2xx status, non-JSON body) comes
//! back as a `CallResult::Failure` value rather than an error.
//!
//! # Design
//! - `build_request` / `parse_response` are pure; `HttpTransport` is the
//!   only I/O seam, with `UreqTransport` as the blocking default.
//! - `extract_path` returns `Option<&Value>`, so a present `null` is
//!   distinguishable from a missing path.
//! - Caller-supplied JSON text (headers, body templates) goes through the
//!   lenient parsers in `input`, which turn malformed input into `None`.
//! - `WorkflowState` tracks keyword loading and per-system test success as a
//!   plain value with pure transitions.

pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod input;
pub mod keywords;
pub mod path;
pub mod transport;
pub mod types;
pub mod workflow;

pub use config::{ConfigError, HarnessConfig, SystemConfig, SystemId};
pub use error::ApiError;
pub use executor::{build_request, execute, parse_response, Executor};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use keywords::{keyword_preview, load_keywords, parse_keywords_from_csv, parse_keywords_from_text, KeywordSource};
pub use path::{extract_path, JsonPath};
pub use transport::{HttpTransport, UreqTransport, DEFAULT_TIMEOUT};
pub use types::{CallResult, RequestSpec};
pub use workflow::{Step, WorkflowState};
