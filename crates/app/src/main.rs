//! Probe - Main Entry Point
//!
//! Loads the harness configuration, runs the DummyJSON contract suite and
//! exits with 0 when every case passed, 1 otherwise, 2 on startup errors.

mod dummyjson;

use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use probe_application::{
    AssertionEngine, CancellationToken, MultiReporter, RequestBuilder, RunSuite,
};
use probe_domain::{HarnessConfig, SuiteReport};
use probe_infrastructure::{
    ConfigLoader, ConsoleReporter, JsonFileReporter, ReqwestExecutor, SeededDataFactory,
    SystemClock,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_STARTUP_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the console report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Probe v{}", env!("CARGO_PKG_VERSION"));

    let config = match ConfigLoader::from_env().load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::from(EXIT_STARTUP_ERROR);
        }
    };

    match run(&config).await {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            error!(error = %e, "failed to start suite");
            ExitCode::from(EXIT_STARTUP_ERROR)
        }
    }
}

async fn run(config: &HarnessConfig) -> Result<SuiteReport, Box<dyn Error>> {
    let builder = RequestBuilder::parse(&config.base_url)?.with_timeout_ms(config.timeout_ms);
    let mut runner = RunSuite::new(
        ReqwestExecutor::new()?,
        AssertionEngine::new(config.like),
        builder,
        SystemClock::new(),
    );
    if let Some(timeout_ms) = config.suite_timeout_ms {
        runner = runner.with_suite_timeout(Duration::from_millis(timeout_ms));
    }

    let mut factory = config
        .seed
        .map_or_else(SeededDataFactory::from_entropy, SeededDataFactory::new);
    info!(base_url = %config.base_url, seed = factory.seed(), "configured run");

    let mut reporter = MultiReporter::new();
    if config.report.console {
        reporter.push(Box::new(ConsoleReporter::stdout()));
    }
    if let Some(path) = &config.report.json_path {
        reporter.push(Box::new(JsonFileReporter::new(path)));
    }

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling suite");
            interrupt.cancel();
        }
    });

    let suite = dummyjson::suite();
    Ok(runner
        .run(&suite, &mut factory, &mut reporter, token.receiver())
        .await)
}
