//! Suite-level run information and results.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::outcome::TestOutcome;

/// Information handed to reporters before the first case runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteInfo {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// Suite name.
    pub name: String,
    /// Number of declared cases.
    pub case_count: usize,
    /// When the run started.
    pub started_at: DateTime<Utc>,
}

impl SuiteInfo {
    /// Creates run information with a fresh run id.
    #[must_use]
    pub fn new(name: impl Into<String>, case_count: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            name: name.into(),
            case_count,
            started_at,
        }
    }
}

/// Why a suite stopped before running every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbortReason {
    /// An explicit stop was requested.
    Cancelled,
    /// The suite exceeded its overall time limit.
    SuiteTimeout {
        /// The limit that was exceeded.
        timeout_ms: u64,
    },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("suite cancelled"),
            Self::SuiteTimeout { timeout_ms } => {
                write!(f, "suite timed out after {timeout_ms}ms")
            }
        }
    }
}

/// Results from running a suite.
///
/// The counters are derived from `outcomes`; deserialization recomputes them
/// rather than trusting the stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReportRecord")]
pub struct SuiteReport {
    /// Run information.
    pub info: SuiteInfo,
    /// One outcome per declared case, in declaration order.
    pub outcomes: Vec<TestOutcome>,
    /// Number of outcomes.
    pub total: usize,
    /// Number of passed outcomes.
    pub passed: usize,
    /// Number of failed (not skipped) outcomes.
    pub failed: usize,
    /// Number of skipped outcomes.
    pub skipped: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
    /// Set when the suite was aborted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aborted: Option<AbortReason>,
}

#[derive(Deserialize)]
struct ReportRecord {
    info: SuiteInfo,
    outcomes: Vec<TestOutcome>,
    duration_ms: u64,
    #[serde(default)]
    aborted: Option<AbortReason>,
}

impl From<ReportRecord> for SuiteReport {
    fn from(record: ReportRecord) -> Self {
        Self::new(
            record.info,
            record.outcomes,
            record.duration_ms,
            record.aborted,
        )
    }
}

impl SuiteReport {
    /// Create a report, computing the counters from `outcomes`.
    #[must_use]
    pub fn new(
        info: SuiteInfo,
        outcomes: Vec<TestOutcome>,
        duration_ms: u64,
        aborted: Option<AbortReason>,
    ) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        let skipped = outcomes.iter().filter(|o| o.is_skipped()).count();
        let failed = total - passed - skipped;

        Self {
            info,
            outcomes,
            total,
            passed,
            failed,
            skipped,
            duration_ms,
            aborted,
        }
    }

    /// Check if every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.total && self.aborted.is_none()
    }

    /// Process exit code: 0 if every case passed, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Failure;

    fn info(case_count: usize) -> SuiteInfo {
        SuiteInfo::new("DummyJSON", case_count, Utc::now())
    }

    #[test]
    fn test_report_counters() {
        let outcomes = vec![
            TestOutcome::new("a", Vec::new(), 2, 10),
            TestOutcome::new(
                "b",
                vec![Failure::StatusMismatch {
                    expected: 200,
                    actual: 500,
                }],
                2,
                10,
            ),
            TestOutcome::skipped("c", "suite cancelled"),
        ];

        let report = SuiteReport::new(info(3), outcomes, 30, Some(AbortReason::Cancelled));
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.all_passed());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_all_passed_exit_code() {
        let outcomes = vec![TestOutcome::new("a", Vec::new(), 1, 5)];
        let report = SuiteReport::new(info(1), outcomes, 5, None);
        assert!(report.all_passed());
        assert_eq!(report.exit_code(), 0);
        assert!((report.pass_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialized_report_recomputes_counters() {
        let outcomes = vec![
            TestOutcome::new("a", Vec::new(), 1, 5),
            TestOutcome::errored("b", Failure::Timeout { timeout_ms: 100 }, 100),
        ];
        let report = SuiteReport::new(info(2), outcomes, 105, None);

        let mut value = serde_json::to_value(&report).expect("report serializes");
        value["passed"] = serde_json::json!(2);
        value["failed"] = serde_json::json!(0);
        value["outcomes"][1]["passed"] = serde_json::json!(true);

        let loaded: SuiteReport = serde_json::from_value(value).expect("report parses");
        assert_eq!(loaded, report);
        assert_eq!(loaded.passed, 1);
        assert_eq!(loaded.failed, 1);
        assert_eq!(loaded.exit_code(), 1);
    }

    #[test]
    fn test_abort_reason_display() {
        assert_eq!(AbortReason::Cancelled.to_string(), "suite cancelled");
        assert_eq!(
            AbortReason::SuiteTimeout { timeout_ms: 500 }.to_string(),
            "suite timed out after 500ms"
        );
    }
}
