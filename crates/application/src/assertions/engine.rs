//! Assertion engine.
//!
//! Evaluates a case's expectations against a response envelope and produces
//! a [`TestOutcome`]. Every expectation is evaluated; failures accumulate.

use std::time::Duration;

use probe_domain::LikeOptions;
use probe_domain::response::ResponseEnvelope;
use probe_domain::testing::{Capture, Expectation, ExpectationSet, Failure, TestOutcome};
use serde_json::Value;

use super::json_path::{self, ROOT};
use super::matching::{MatchMode, match_subset};
use super::schema::check_schema;

/// Checks expectations and extracts captures from responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssertionEngine {
    like: LikeOptions,
}

impl AssertionEngine {
    /// Creates an engine using the given `JsonLike` tolerances.
    #[must_use]
    pub const fn new(like: LikeOptions) -> Self {
        Self { like }
    }

    /// Checks a single expectation, returning every failure it produced.
    #[must_use]
    pub fn check(&self, expectation: &Expectation, response: &ResponseEnvelope) -> Vec<Failure> {
        let mut failures = Vec::new();
        match expectation {
            Expectation::StatusEquals { expected } => {
                if response.status != *expected {
                    failures.push(Failure::StatusMismatch {
                        expected: *expected,
                        actual: response.status,
                    });
                }
            }
            Expectation::SchemaConforms { schema } => {
                check_schema(schema, &response.body, &mut failures);
            }
            Expectation::JsonMatch { subset } => {
                match_subset(subset, Some(&response.body), ROOT, MatchMode::Exact, &mut failures);
            }
            Expectation::JsonLike { subset } => {
                match_subset(
                    subset,
                    Some(&response.body),
                    ROOT,
                    MatchMode::Like(self.like),
                    &mut failures,
                );
            }
        }
        failures
    }

    /// Evaluates every expectation in the set. No short-circuiting: a status
    /// mismatch does not hide a schema violation.
    #[must_use]
    pub fn evaluate(
        &self,
        name: &str,
        expectations: &ExpectationSet,
        response: &ResponseEnvelope,
        elapsed: Duration,
    ) -> TestOutcome {
        let failures: Vec<Failure> = expectations
            .iter()
            .flat_map(|expectation| self.check(expectation, response))
            .collect();

        TestOutcome::new(name, failures, expectations.len(), millis(elapsed))
    }

    /// Extracts capture values from the response body.
    ///
    /// Captures that resolve to nothing (or to `null`) produce a
    /// `CaptureMissing` failure instead of a binding.
    #[must_use]
    pub fn capture(
        &self,
        captures: &[Capture],
        response: &ResponseEnvelope,
    ) -> (Vec<(String, Value)>, Vec<Failure>) {
        let mut values = Vec::with_capacity(captures.len());
        let mut failures = Vec::new();

        for capture in captures {
            match json_path::query(&response.body, &capture.path) {
                Ok(Some(value)) if !value.is_null() => {
                    values.push((capture.name.clone(), value.clone()));
                }
                _ => failures.push(Failure::CaptureMissing {
                    name: capture.name.clone(),
                    path: capture.path.clone(),
                }),
            }
        }

        (values, failures)
    }
}

/// Converts a duration into whole milliseconds, saturating on overflow.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
