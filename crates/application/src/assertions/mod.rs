//! Response assertions.
//!
//! Status checks, structural schema validation, exact and tolerant
//! subset matching, and value capture, all addressed by `$`-rooted paths.

mod engine;
pub mod json_path;
mod matching;
mod schema;

pub use engine::AssertionEngine;
pub(crate) use engine::millis;
