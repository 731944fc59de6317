//! Run suite use case.

use std::time::{Duration, Instant};

use probe_domain::{AbortReason, Bindings, Failure, SuiteInfo, SuiteReport, TestOutcome};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::assertions::{AssertionEngine, millis};
use crate::ports::{CancellationReceiver, Clock, DataFactory, HttpExecutor, Reporter};
use crate::request_builder::RequestBuilder;
use crate::suite::{CasePlan, Suite};

/// How a single case ended.
enum CaseRun {
    Completed {
        outcome: TestOutcome,
        captured: Vec<(String, Value)>,
    },
    Aborted(AbortReason),
}

impl CaseRun {
    const fn failed(outcome: TestOutcome) -> Self {
        Self::Completed {
            outcome,
            captured: Vec::new(),
        }
    }
}

/// Use case that runs a suite's cases in declaration order.
///
/// Each case is planned, built, executed and evaluated before the next one
/// starts. Values captured from a response are bound for every later case.
/// Build and transport problems fail only their own case. Cancellation and
/// the optional suite timeout stop the run: the interrupted case and every
/// remaining case are reported as skipped.
pub struct RunSuite<E: HttpExecutor, C: Clock> {
    executor: E,
    engine: AssertionEngine,
    builder: RequestBuilder,
    clock: C,
    suite_timeout: Option<Duration>,
}

impl<E: HttpExecutor, C: Clock> RunSuite<E, C> {
    /// Creates a new `RunSuite` use case.
    #[must_use]
    pub const fn new(
        executor: E,
        engine: AssertionEngine,
        builder: RequestBuilder,
        clock: C,
    ) -> Self {
        Self {
            executor,
            engine,
            builder,
            clock,
            suite_timeout: None,
        }
    }

    /// Sets an overall time limit for the suite.
    #[must_use]
    pub const fn with_suite_timeout(mut self, timeout: Duration) -> Self {
        self.suite_timeout = Some(timeout);
        self
    }

    /// Runs every case of `suite` and returns the report.
    ///
    /// Reporter errors are logged and otherwise ignored; they never change
    /// an outcome.
    pub async fn run(
        &self,
        suite: &Suite,
        factory: &mut dyn DataFactory,
        reporter: &mut dyn Reporter,
        mut cancel: CancellationReceiver,
    ) -> SuiteReport {
        let started = Instant::now();
        let deadline = self
            .suite_timeout
            .map(|timeout| tokio::time::Instant::now() + timeout);
        let info = SuiteInfo::new(suite.name(), suite.len(), self.clock.now());

        info!(suite = %info.name, run_id = %info.run_id, cases = info.case_count, "starting suite");
        if let Err(e) = reporter.start(&info) {
            warn!(error = %e, "reporter failed on start");
        }

        let mut bindings = Bindings::new();
        let mut outcomes = Vec::with_capacity(suite.len());
        let mut aborted = None;

        for plan in suite.plans() {
            if aborted.is_none() {
                aborted = self.abort_reason(&cancel, deadline);
            }

            let outcome = if let Some(reason) = aborted {
                TestOutcome::skipped(plan.name(), reason.to_string())
            } else {
                match self
                    .run_case(plan, &bindings, factory, &mut cancel, deadline)
                    .await
                {
                    CaseRun::Completed { outcome, captured } => {
                        if !captured.is_empty() {
                            bindings = bindings.extended(captured);
                        }
                        outcome
                    }
                    CaseRun::Aborted(reason) => {
                        warn!(case = plan.name(), %reason, "suite aborted");
                        aborted = Some(reason);
                        TestOutcome::skipped(plan.name(), reason.to_string())
                    }
                }
            };

            if outcome.passed() {
                info!(case = outcome.name(), duration_ms = outcome.duration_ms(), "case passed");
            } else if !outcome.is_skipped() {
                info!(
                    case = outcome.name(),
                    failures = outcome.failures().len(),
                    "case failed"
                );
            }
            if let Err(e) = reporter.handle(&outcome) {
                warn!(case = outcome.name(), error = %e, "reporter failed on outcome");
            }
            outcomes.push(outcome);
        }

        let report = SuiteReport::new(info, outcomes, millis(started.elapsed()), aborted);
        info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            duration_ms = report.duration_ms,
            "suite finished"
        );
        if let Err(e) = reporter.end(&report) {
            warn!(error = %e, "reporter failed on end");
        }
        report
    }

    fn abort_reason(
        &self,
        cancel: &CancellationReceiver,
        deadline: Option<tokio::time::Instant>,
    ) -> Option<AbortReason> {
        if cancel.is_cancelled() {
            return Some(AbortReason::Cancelled);
        }
        match deadline {
            Some(deadline) if tokio::time::Instant::now() >= deadline => {
                Some(self.timeout_reason())
            }
            _ => None,
        }
    }

    fn timeout_reason(&self) -> AbortReason {
        AbortReason::SuiteTimeout {
            timeout_ms: self.suite_timeout.map_or(0, millis),
        }
    }

    async fn run_case(
        &self,
        plan: &CasePlan,
        bindings: &Bindings,
        factory: &mut dyn DataFactory,
        cancel: &mut CancellationReceiver,
        deadline: Option<tokio::time::Instant>,
    ) -> CaseRun {
        let started = Instant::now();
        debug!(case = plan.name(), "planning case");

        let case = match plan.resolve(bindings, factory) {
            Ok(case) => case,
            Err(e) => {
                return CaseRun::failed(TestOutcome::errored(
                    plan.name(),
                    Failure::Build {
                        message: e.to_string(),
                    },
                    millis(started.elapsed()),
                ));
            }
        };

        let request = match self.builder.build(&case.request, bindings) {
            Ok(request) => request,
            Err(e) => {
                return CaseRun::failed(TestOutcome::errored(
                    &case.name,
                    Failure::Build {
                        message: e.to_string(),
                    },
                    millis(started.elapsed()),
                ));
            }
        };

        debug!(
            case = %case.name,
            method = %request.method,
            url = %request.url,
            "executing request"
        );
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return CaseRun::Aborted(AbortReason::Cancelled),
            () = wait_for(deadline) => return CaseRun::Aborted(self.timeout_reason()),
            result = self.executor.execute(&request) => result,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                debug!(case = %case.name, error = %e, "request failed");
                return CaseRun::failed(TestOutcome::errored(
                    &case.name,
                    e.into_failure(),
                    millis(started.elapsed()),
                ));
            }
        };
        debug!(case = %case.name, status = response.status, "response received");

        let outcome = self
            .engine
            .evaluate(&case.name, &case.expectations, &response, started.elapsed());
        let (captured, missing) = self.engine.capture(&case.captures, &response);
        let outcome = if missing.is_empty() {
            outcome
        } else {
            let failures = outcome.failures().iter().cloned().chain(missing).collect();
            TestOutcome::new(
                outcome.name(),
                failures,
                outcome.evaluated(),
                outcome.duration_ms(),
            )
        };

        CaseRun::Completed { outcome, captured }
    }
}

/// Resolves at `deadline`, or never when there is none.
async fn wait_for(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
