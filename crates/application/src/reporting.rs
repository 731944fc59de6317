//! Reporter composition.

use probe_domain::{SuiteInfo, SuiteReport, TestOutcome};
use tracing::warn;

use crate::ports::{ReportError, Reporter};

/// Fans every event out to several reporters.
///
/// A failing reporter does not stop the others from receiving the event;
/// the first error is returned once all of them have been called.
#[derive(Default)]
pub struct MultiReporter {
    reporters: Vec<Box<dyn Reporter>>,
}

impl MultiReporter {
    /// Creates an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reporter.
    #[must_use]
    pub fn with(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporters.push(Box::new(reporter));
        self
    }

    /// Adds a boxed reporter.
    pub fn push(&mut self, reporter: Box<dyn Reporter>) {
        self.reporters.push(reporter);
    }

    /// Number of reporters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    /// Returns true if there are no reporters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    fn each<F>(&mut self, mut call: F) -> Result<(), ReportError>
    where
        F: FnMut(&mut dyn Reporter) -> Result<(), ReportError>,
    {
        let mut first = None;
        for reporter in &mut self.reporters {
            if let Err(e) = call(reporter.as_mut()) {
                if first.is_some() {
                    warn!(error = %e, "additional reporter failure");
                } else {
                    first = Some(e);
                }
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl std::fmt::Debug for MultiReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiReporter")
            .field("reporters", &self.reporters.len())
            .finish()
    }
}

impl Reporter for MultiReporter {
    fn start(&mut self, info: &SuiteInfo) -> Result<(), ReportError> {
        self.each(|reporter| reporter.start(info))
    }

    fn handle(&mut self, outcome: &TestOutcome) -> Result<(), ReportError> {
        self.each(|reporter| reporter.handle(outcome))
    }

    fn end(&mut self, report: &SuiteReport) -> Result<(), ReportError> {
        self.each(|reporter| reporter.end(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Counting {
        handled: Arc<Mutex<usize>>,
    }

    impl Reporter for Counting {
        fn handle(&mut self, _: &TestOutcome) -> Result<(), ReportError> {
            *self.handled.lock().expect("Lock poisoned") += 1;
            Ok(())
        }
    }

    struct Broken(&'static str);

    impl Reporter for Broken {
        fn handle(&mut self, _: &TestOutcome) -> Result<(), ReportError> {
            Err(ReportError::Serialization(self.0.to_string()))
        }
    }

    #[test]
    fn test_fans_out_past_failures() {
        let handled = Arc::new(Mutex::new(0));
        let mut reporter = MultiReporter::new()
            .with(Broken("first"))
            .with(Counting {
                handled: Arc::clone(&handled),
            })
            .with(Broken("second"));

        let result = reporter.handle(&TestOutcome::new("Get product", Vec::new(), 1, 3));

        assert!(matches!(result, Err(ReportError::Serialization(m)) if m == "first"));
        assert_eq!(*handled.lock().expect("Lock poisoned"), 1);
        assert_eq!(reporter.len(), 3);
    }

    #[test]
    fn test_empty_is_ok() {
        let mut reporter = MultiReporter::new();
        assert!(reporter.is_empty());
        assert!(reporter.handle(&TestOutcome::skipped("Get product", "suite cancelled")).is_ok());
    }
}
