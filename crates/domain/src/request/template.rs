//! Declarative request templates.
//!
//! A template is the unresolved form of a [`RequestSpec`](super::RequestSpec):
//! its path may contain `{name}` placeholders that are filled from bindings
//! when the request is built.

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod, QueryParams};

/// Unresolved description of an HTTP call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// HTTP method
    pub method: HttpMethod,
    /// Path template relative to the base URL, e.g. `/products/{id}`.
    /// May also be an absolute URL or carry an inline query string.
    pub path: String,
    /// Query parameters, appended in insertion order
    #[serde(default)]
    pub query: QueryParams,
    /// Case-specific headers
    #[serde(default)]
    pub headers: Headers,
    /// Optional JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Overrides the default timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestTemplate {
    /// Creates a template with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: Headers::new(),
            body: None,
            timeout_ms: None,
        }
    }

    /// Creates a GET template.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST template.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT template.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a PATCH template.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Creates a DELETE template.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl std::fmt::Display) -> Self {
        self.query = self.query.with(key, value);
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets a JSON body from an already-built value.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` and sets it as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `body` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Overrides the call timeout.
    #[must_use]
    pub const fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}
