//! HTTP executor implementation using reqwest.
//!
//! This adapter implements the `HttpExecutor` port. Every call makes exactly
//! one attempt with the request's own timeout.

use std::time::{Duration, Instant};

use probe_application::ports::{ExecuteError, HttpExecutor};
use probe_domain::{
    request::{Headers, HttpMethod, RequestSpec},
    response::ResponseEnvelope,
};
use reqwest::{Client, Method};
use tracing::debug;

/// HTTP executor backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Creates a new executor with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "Probe/0.1.0"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, ExecuteError> {
        let client = Client::builder()
            .user_agent(concat!("Probe/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(ExecuteError::transport)?;

        Ok(Self { client })
    }

    /// Creates an executor around a preconfigured reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `ExecuteError`, keeping the underlying cause.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> ExecuteError {
        if error.is_timeout() {
            return ExecuteError::Timeout { timeout_ms };
        }
        ExecuteError::transport(describe(error))
    }
}

/// Renders an error together with its source chain.
fn describe(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseEnvelope, ExecuteError> {
        let timeout_ms = request.timeout_ms;
        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone())
            .timeout(Duration::from_millis(timeout_ms));

        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ExecuteError::InvalidBody(e.to_string()))?;
            builder = builder.body(bytes);
        }

        debug!(method = %request.method, url = %request.url, timeout_ms, "sending request");
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    v.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();

        // The timeout covers the body too; a stalled body is a timeout, not a partial envelope.
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;
        let duration = start.elapsed();

        debug!(status, bytes = body.len(), elapsed = ?duration, "response received");
        Ok(ResponseEnvelope::from_raw(status, headers, &body, duration))
    }
}
