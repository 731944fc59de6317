//! JSON report file writer.

use std::path::{Path, PathBuf};

use probe_application::ports::{ReportError, Reporter};
use probe_domain::{SuiteReport, TestOutcome};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

/// Writes the final [`SuiteReport`] as pretty JSON when the suite ends.
///
/// Parent directories are created as needed and an existing file is replaced.
#[derive(Debug, Clone)]
pub struct JsonFileReporter {
    path: PathBuf,
}

impl JsonFileReporter {
    /// Creates a reporter writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for JsonFileReporter {
    fn handle(&mut self, _outcome: &TestOutcome) -> Result<(), ReportError> {
        Ok(())
    }

    fn end(&mut self, report: &SuiteReport) -> Result<(), ReportError> {
        let bytes = encode(report).map_err(|e| ReportError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, bytes)?;
        info!(path = %self.path.display(), "wrote JSON report");
        Ok(())
    }
}

/// Two-space indented JSON with a trailing newline, so consecutive runs diff
/// cleanly.
fn encode(report: &SuiteReport) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    report.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use probe_domain::{AbortReason, Failure, SuiteInfo};
    use tempfile::TempDir;

    fn report() -> SuiteReport {
        let info = SuiteInfo::new("DummyJSON", 2, Utc::now());
        SuiteReport::new(
            info,
            vec![
                TestOutcome::new("List products", Vec::new(), 3, 12),
                TestOutcome::errored(
                    "Get product",
                    Failure::Timeout { timeout_ms: 100 },
                    100,
                ),
            ],
            112,
            Some(AbortReason::SuiteTimeout { timeout_ms: 5000 }),
        )
    }

    #[test]
    fn test_writes_report_round_trippable() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("reports").join("run.json");
        let mut reporter = JsonFileReporter::new(&path);

        let report = report();
        reporter.end(&report).expect("report written");

        let content = std::fs::read_to_string(&path).expect("file exists");
        assert!(content.ends_with("}\n"));
        assert!(content.contains("\n  \"outcomes\": [\n    {\n      \"name\": \"List products\""));
        let parsed: SuiteReport = serde_json::from_str(&content).expect("valid report json");
        assert_eq!(parsed, report);

        let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
        assert_eq!(value["outcomes"][1]["failures"][0]["kind"], "timeout");
        assert_eq!(value["aborted"]["reason"], "suite_timeout");
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = TempDir::new().expect("temp dir");
        let mut reporter = JsonFileReporter::new(dir.path());
        let error = reporter.end(&report()).expect_err("a directory is not a file");
        assert!(matches!(error, ReportError::Io(_)));
    }
}
