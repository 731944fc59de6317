//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness core and its external
//! collaborators: the remote service, fixture generation and report sinks.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod cancellation;
mod clock;
mod data_factory;
mod http_executor;
mod reporter;

pub use cancellation::{CancellationReceiver, CancellationToken};
pub use clock::Clock;
pub use data_factory::DataFactory;
pub use http_executor::{ExecuteError, HttpExecutor};
pub use reporter::{ReportError, Reporter};
