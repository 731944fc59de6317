//! Probe Domain - Core contract-testing types
//!
//! This crate defines the data model of the Probe harness: requests,
//! responses, expectations, outcomes and configuration.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use config::{HarnessConfig, LikeOptions, ReportSettings};
pub use error::{DomainError, DomainResult};
pub use testing::{
    AbortReason, Bindings, Capture, Case, Expectation, ExpectationKind, ExpectationSet, Failure,
    FailureKind, JsonType, SchemaDescriptor, SuiteInfo, SuiteReport, TestOutcome,
};
