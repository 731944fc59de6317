//! Contract testing types.
//!
//! This module provides the declarative side of the harness: cases and their
//! expectations, schema descriptors, and the outcomes produced when a case runs.

mod bindings;
mod case;
mod expectation;
mod outcome;
mod report;
mod schema;

pub use bindings::Bindings;
pub use case::{Capture, Case};
pub use expectation::{Expectation, ExpectationKind, ExpectationSet};
pub use outcome::{Failure, FailureKind, TestOutcome};
pub use report::{AbortReason, SuiteInfo, SuiteReport};
pub use schema::{JsonType, SchemaDescriptor};
