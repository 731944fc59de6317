//! Probe Application - Use cases and ports
//!
//! This crate contains the harness logic: request building, assertion
//! evaluation and the suite runner. It defines ports (traits) that the
//! infrastructure layer implements.

pub mod assertions;
pub mod error;
pub mod ports;
pub mod reporting;
pub mod request_builder;
pub mod suite;
pub mod use_cases;

pub use assertions::AssertionEngine;
pub use error::BuildError;
pub use ports::{
    CancellationReceiver, CancellationToken, Clock, DataFactory, ExecuteError, HttpExecutor,
    ReportError, Reporter,
};
pub use reporting::MultiReporter;
pub use request_builder::RequestBuilder;
pub use suite::{CasePlan, Suite};
pub use use_cases::RunSuite;
