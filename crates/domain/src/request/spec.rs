//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Headers, HttpMethod};
use crate::error::{DomainError, DomainResult};

/// A fully resolved HTTP call, ready to be executed.
///
/// The URL is always absolute http(s) and the timeout is always positive;
/// both are checked by [`RequestSpec::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: Url,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Optional JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
}

impl RequestSpec {
    /// Creates a request specification after validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the URL is not http(s) and
    /// `DomainError::InvalidTimeout` if `timeout_ms` is zero.
    pub fn new(method: HttpMethod, url: Url, timeout_ms: u64) -> DomainResult<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "{url}: scheme must be http or https"
            )));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(DomainError::InvalidUrl(format!("{url}: missing host")));
        }
        if timeout_ms == 0 {
            return Err(DomainError::InvalidTimeout(timeout_ms));
        }

        Ok(Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
            timeout_ms,
        })
    }

    /// Creates a GET request for the given URL string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the timeout is zero.
    pub fn get(url: &str, timeout_ms: u64) -> DomainResult<Self> {
        let url = Url::parse(url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {url}")))?;
        Self::new(HttpMethod::Get, url, timeout_ms)
    }

    /// Sets the headers (builder pattern).
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the JSON body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_request() {
        let req = RequestSpec::get("https://api.example.com/users", 1000).expect("valid request");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url.as_str(), "https://api.example.com/users");
        assert_eq!(req.timeout_ms, 1000);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_relative_url_rejected() {
        let result = RequestSpec::get("/users", 1000);
        assert!(matches!(result, Err(DomainError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = RequestSpec::get("ftp://files.example.com/a", 1000);
        assert!(matches!(result, Err(DomainError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = RequestSpec::get("https://api.example.com", 0);
        assert_eq!(result, Err(DomainError::InvalidTimeout(0)));
    }
}
