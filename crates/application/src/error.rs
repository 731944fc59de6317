//! Application error types

use probe_domain::DomainError;
use thiserror::Error;

/// Errors raised while turning a case into a resolved request.
///
/// A build error is fatal to its case only: the runner records it as a
/// single synthetic failure and moves on.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The path template references a name that is not bound.
    #[error("undefined variable '{0}' in path template")]
    UndefinedVariable(String),

    /// The path template has an unclosed or empty placeholder.
    #[error("malformed path template '{template}': {reason}")]
    MalformedTemplate {
        /// The offending template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A placeholder is bound to an object, array or null.
    #[error("variable '{0}' must be a string, number or boolean")]
    NonScalarVariable(String),

    /// The request body could not be serialized.
    #[error("body serialization failed: {0}")]
    Body(#[from] serde_json::Error),

    /// The resolved request violates a domain invariant.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// A case plan could not produce a case.
    #[error("case plan failed: {0}")]
    Plan(String),
}
