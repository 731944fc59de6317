//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid, relative, or not http(s).
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A timeout of zero was requested.
    #[error("invalid timeout: {0}ms (must be greater than zero)")]
    InvalidTimeout(u64),

    /// A numeric tolerance is negative or not a number.
    #[error("invalid tolerance: {0} (must be a non-negative number)")]
    InvalidTolerance(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
