//! The single I/O seam of the executor.
//!
//! # Design
//! `HttpTransport` sends an already-built `HttpRequest` and hands back the raw
//! `HttpResponse`, whatever its status. Status interpretation belongs to
//! `parse_response`, so the ureq agent is configured with
//! `http_status_as_error(false)`: 4xx/5xx come back as data, and only
//! genuine transport faults surface as `ApiError::Transport`.

use std::time::Duration;

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Upper bound for one full round trip (connect + send + read).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Responses larger than this are a transport error.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Executes one `HttpRequest` against the network.
pub trait HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a ureq agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(format!("failed to read response body: {e}")))?;

        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_ten_seconds() {
        assert_eq!(UreqTransport::new().timeout(), Duration::from_secs(10));
        assert_eq!(UreqTransport::default().timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn custom_timeout_is_kept() {
        let transport = UreqTransport::with_timeout(Duration::from_millis(250));
        assert_eq!(transport.timeout(), Duration::from_millis(250));
        assert_eq!(transport.clone().timeout(), Duration::from_millis(250));
    }
}
