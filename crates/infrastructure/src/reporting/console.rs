//! Human-readable console reporter.

use std::io::{self, Stdout, Write};

use probe_application::ports::{ReportError, Reporter};
use probe_domain::{SuiteInfo, SuiteReport, TestOutcome};

/// Writes one line per case plus a summary to any writer.
///
/// ```text
/// Running suite 'DummyJSON' (2 cases)
/// PASS  Get product (41ms)
/// FAIL  Delete product (38ms)
///       - Value mismatch at '$.isDeleted': expected true, got false
///
/// 1 passed, 1 failed, 0 skipped (2 total) in 80ms
/// ```
#[derive(Debug)]
pub struct ConsoleReporter<W: Write + Send> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    /// Creates a reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn start(&mut self, info: &SuiteInfo) -> Result<(), ReportError> {
        writeln!(
            self.out,
            "Running suite '{}' ({} cases)",
            info.name, info.case_count
        )?;
        Ok(())
    }

    fn handle(&mut self, outcome: &TestOutcome) -> Result<(), ReportError> {
        if outcome.is_skipped() {
            writeln!(self.out, "SKIP  {}", outcome.name())?;
        } else {
            let label = if outcome.passed() { "PASS" } else { "FAIL" };
            writeln!(
                self.out,
                "{label}  {} ({}ms)",
                outcome.name(),
                outcome.duration_ms()
            )?;
            for failure in outcome.failures() {
                writeln!(self.out, "      - {failure}")?;
            }
        }
        Ok(())
    }

    fn end(&mut self, report: &SuiteReport) -> Result<(), ReportError> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} passed, {} failed, {} skipped ({} total) in {}ms",
            report.passed, report.failed, report.skipped, report.total, report.duration_ms
        )?;
        if let Some(reason) = report.aborted {
            writeln!(self.out, "Aborted: {reason}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use probe_domain::{AbortReason, ExpectationKind, Failure};
    use serde_json::json;

    fn render(outcomes: Vec<TestOutcome>, aborted: Option<AbortReason>) -> String {
        let info = SuiteInfo::new("DummyJSON", outcomes.len(), Utc::now());
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.start(&info).expect("start");
        for outcome in &outcomes {
            reporter.handle(outcome).expect("handle");
        }
        reporter
            .end(&SuiteReport::new(info, outcomes, 80, aborted))
            .expect("end");
        String::from_utf8(reporter.into_inner()).expect("utf-8 output")
    }

    #[test]
    fn test_pass_and_fail_lines() {
        let output = render(
            vec![
                TestOutcome::new("Get product", Vec::new(), 3, 41),
                TestOutcome::new(
                    "Delete product",
                    vec![Failure::ValueMismatch {
                        expectation: ExpectationKind::JsonMatch,
                        path: "$.isDeleted".to_string(),
                        expected: json!(true),
                        actual: Some(json!(false)),
                    }],
                    3,
                    38,
                ),
            ],
            None,
        );

        assert_eq!(
            output,
            "Running suite 'DummyJSON' (2 cases)\n\
             PASS  Get product (41ms)\n\
             FAIL  Delete product (38ms)\n      \
             - Value mismatch at '$.isDeleted': expected true, got false\n\
             \n\
             1 passed, 1 failed, 0 skipped (2 total) in 80ms\n"
        );
    }

    #[test]
    fn test_skipped_and_aborted() {
        let output = render(
            vec![TestOutcome::skipped("List carts", "suite cancelled")],
            Some(AbortReason::Cancelled),
        );
        assert!(output.contains("SKIP  List carts\n"));
        assert!(output.contains("0 passed, 0 failed, 1 skipped (1 total)"));
        assert!(output.ends_with("Aborted: suite cancelled\n"));
    }
}
