//! Per-case outcomes and the failures they carry.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::expectation::ExpectationKind;
use super::schema::JsonType;

/// A single recorded failure.
///
/// Assertion-layer failures (`StatusMismatch`, `SchemaViolation`,
/// `ValueMismatch`) come from expectations; the remaining variants are
/// synthesized by the runner so that one misbehaving case never aborts the
/// suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// The status code differed.
    StatusMismatch {
        /// Expected code.
        expected: u16,
        /// Actual code.
        actual: u16,
    },
    /// A body node did not have the declared type, or a required property was absent.
    SchemaViolation {
        /// Location in the body, e.g. `$.products[0].id`.
        path: String,
        /// Declared type, if the schema declared one.
        expected_type: Option<JsonType>,
        /// Actual type; `None` when the property is missing.
        actual_type: Option<JsonType>,
    },
    /// A value differed from the expected subset.
    ValueMismatch {
        /// Expectation that produced the mismatch.
        expectation: ExpectationKind,
        /// Location in the body.
        path: String,
        /// Expected value.
        expected: Value,
        /// Actual value; `None` when the key is missing.
        actual: Option<Value>,
    },
    /// A declared capture found nothing at its path.
    CaptureMissing {
        /// Binding name.
        name: String,
        /// Path that was queried.
        path: String,
    },
    /// The request could not be built.
    Build {
        /// Underlying error text.
        message: String,
    },
    /// The request failed at the network layer.
    Transport {
        /// Underlying error text.
        message: String,
    },
    /// The request exceeded its timeout.
    Timeout {
        /// Timeout that was exceeded.
        timeout_ms: u64,
    },
    /// The case did not run because the suite was aborted.
    Skipped {
        /// Why the suite was aborted.
        reason: String,
    },
}

/// Discriminant of [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// See [`Failure::StatusMismatch`].
    StatusMismatch,
    /// See [`Failure::SchemaViolation`].
    SchemaViolation,
    /// See [`Failure::ValueMismatch`].
    ValueMismatch,
    /// See [`Failure::CaptureMissing`].
    CaptureMissing,
    /// See [`Failure::Build`].
    Build,
    /// See [`Failure::Transport`].
    Transport,
    /// See [`Failure::Timeout`].
    Timeout,
    /// See [`Failure::Skipped`].
    Skipped,
}

impl Failure {
    /// Returns the kind of this failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::StatusMismatch { .. } => FailureKind::StatusMismatch,
            Self::SchemaViolation { .. } => FailureKind::SchemaViolation,
            Self::ValueMismatch { .. } => FailureKind::ValueMismatch,
            Self::CaptureMissing { .. } => FailureKind::CaptureMissing,
            Self::Build { .. } => FailureKind::Build,
            Self::Transport { .. } => FailureKind::Transport,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Skipped { .. } => FailureKind::Skipped,
        }
    }

    /// Returns the expectation kind this failure came from, if any.
    #[must_use]
    pub const fn expectation_kind(&self) -> Option<ExpectationKind> {
        match self {
            Self::StatusMismatch { .. } => Some(ExpectationKind::StatusEquals),
            Self::SchemaViolation { .. } => Some(ExpectationKind::SchemaConforms),
            Self::ValueMismatch { expectation, .. } => Some(*expectation),
            _ => None,
        }
    }

    /// Human-readable diagnostic.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn type_name(ty: Option<JsonType>) -> &'static str {
    ty.map_or("missing", JsonType::as_str)
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusMismatch { expected, actual } => {
                write!(f, "Expected status {expected}, got {actual}")
            }
            Self::SchemaViolation {
                path,
                expected_type,
                actual_type,
            } => write!(
                f,
                "Schema violation at '{path}': expected {}, found {}",
                expected_type.map_or("present", JsonType::as_str),
                type_name(*actual_type)
            ),
            Self::ValueMismatch {
                path,
                expected,
                actual: Some(actual),
                ..
            } => write!(f, "Value mismatch at '{path}': expected {expected}, got {actual}"),
            Self::ValueMismatch {
                path,
                expected,
                actual: None,
                ..
            } => write!(f, "Value mismatch at '{path}': expected {expected}, not found"),
            Self::CaptureMissing { name, path } => {
                write!(f, "Capture '{name}' found nothing at '{path}'")
            }
            Self::Build { message } => write!(f, "Request build failed: {message}"),
            Self::Transport { message } => write!(f, "Transport error: {message}"),
            Self::Timeout { timeout_ms } => write!(f, "Request timed out after {timeout_ms}ms"),
            Self::Skipped { reason } => write!(f, "Skipped: {reason}"),
        }
    }
}

/// Result of running one case. Immutable once created.
///
/// `passed` is serialized for readers of report files but always recomputed
/// from `failures` on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OutcomeRecord")]
pub struct TestOutcome {
    name: String,
    passed: bool,
    failures: Vec<Failure>,
    evaluated: usize,
    duration_ms: u64,
}

#[derive(Deserialize)]
struct OutcomeRecord {
    name: String,
    failures: Vec<Failure>,
    evaluated: usize,
    duration_ms: u64,
}

impl From<OutcomeRecord> for TestOutcome {
    fn from(record: OutcomeRecord) -> Self {
        Self::new(
            record.name,
            record.failures,
            record.evaluated,
            record.duration_ms,
        )
    }
}

impl TestOutcome {
    /// Creates an outcome; it passes iff `failures` is empty.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        failures: Vec<Failure>,
        evaluated: usize,
        duration_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            passed: failures.is_empty(),
            failures,
            evaluated,
            duration_ms,
        }
    }

    /// Creates a failed outcome from a single synthetic failure.
    #[must_use]
    pub fn errored(name: impl Into<String>, failure: Failure, duration_ms: u64) -> Self {
        Self::new(name, vec![failure], 0, duration_ms)
    }

    /// Creates a skipped outcome.
    #[must_use]
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::errored(
            name,
            Failure::Skipped {
                reason: reason.into(),
            },
            0,
        )
    }

    /// Case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True iff no failure was recorded.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    /// Failures in the order they were recorded.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Number of expectations that were evaluated.
    #[must_use]
    pub const fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// Wall-clock duration of the case.
    #[must_use]
    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// True if the case was skipped because the suite was aborted.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.failures.as_slice(), [Failure::Skipped { .. }])
    }
}
