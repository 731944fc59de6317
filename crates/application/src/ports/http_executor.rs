//! HTTP executor port

use std::future::Future;

use probe_domain::{Failure, request::RequestSpec, response::ResponseEnvelope};
use thiserror::Error;

/// Errors an executor can report instead of a response.
///
/// None of these carry a partial response: a call either produces a complete
/// [`ResponseEnvelope`] or one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteError {
    /// The call exceeded its timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_ms: u64,
    },

    /// DNS, connection, TLS or other network-level failure.
    #[error("transport error: {message}")]
    Transport {
        /// Underlying cause.
        message: String,
    },

    /// The request body could not be encoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl ExecuteError {
    /// Creates a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: cause.to_string(),
        }
    }

    /// Converts this error to the synthetic failure recorded for the case.
    #[must_use]
    pub fn into_failure(self) -> Failure {
        match self {
            Self::Timeout { timeout_ms } => Failure::Timeout { timeout_ms },
            Self::Transport { message } => Failure::Transport { message },
            Self::InvalidBody(message) => Failure::Build { message },
        }
    }
}

/// Port for executing HTTP requests.
///
/// Implementations make exactly one attempt per call and never retry:
/// contract tests must observe the service's unmodified behavior.
pub trait HttpExecutor: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Arguments
    ///
    /// * `request` - The resolved request to send
    ///
    /// # Errors
    ///
    /// Returns `ExecuteError::Timeout` if the request's timeout elapses and
    /// `ExecuteError::Transport` on network-level failures.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseEnvelope, ExecuteError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_failure() {
        assert_eq!(
            ExecuteError::Timeout { timeout_ms: 50 }.into_failure(),
            Failure::Timeout { timeout_ms: 50 }
        );
        assert_eq!(
            ExecuteError::transport("connection refused").into_failure(),
            Failure::Transport {
                message: "connection refused".to_string()
            }
        );
    }
}
