//! Probe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod fixtures;
pub mod reporting;

pub use adapters::{ReqwestExecutor, SystemClock};
pub use config::{ConfigError, ConfigLoader};
pub use fixtures::SeededDataFactory;
pub use reporting::{ConsoleReporter, JsonFileReporter};
