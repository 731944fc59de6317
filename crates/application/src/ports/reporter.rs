//! Reporter port

use probe_domain::{SuiteInfo, SuiteReport, TestOutcome};
use thiserror::Error;

/// Errors a reporter may return. They are logged, never escalated.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the destination failed.
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the report failed.
    #[error("report serialization failed: {0}")]
    Serialization(String),
}

/// Sink for per-case outcomes.
///
/// Lifecycle: `start` once before the first case, `handle` once per case in
/// declaration order, `end` once after the last case.
pub trait Reporter: Send {
    /// Called before the first case runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn start(&mut self, _info: &SuiteInfo) -> Result<(), ReportError> {
        Ok(())
    }

    /// Called once per case.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn handle(&mut self, outcome: &TestOutcome) -> Result<(), ReportError>;

    /// Called after the last case.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn end(&mut self, _report: &SuiteReport) -> Result<(), ReportError> {
        Ok(())
    }
}
