//! Harness configuration model.
//!
//! Defines the settings a suite run is driven by. Loading from files and the
//! environment lives in the infrastructure layer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default base URL of the service under test.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default per-call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 90_000;

/// Tolerances used by `JsonLike` comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikeOptions {
    /// Compare strings ignoring case.
    pub ignore_case: bool,
    /// Trim strings and collapse inner whitespace runs before comparing.
    pub normalize_whitespace: bool,
    /// Maximum absolute difference for numbers to be considered alike.
    pub epsilon: f64,
}

impl Default for LikeOptions {
    fn default() -> Self {
        Self {
            ignore_case: true,
            normalize_whitespace: true,
            epsilon: 1e-6,
        }
    }
}

impl LikeOptions {
    /// Options that only accept exact values.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            ignore_case: false,
            normalize_whitespace: false,
            epsilon: 0.0,
        }
    }
}

/// Where outcomes are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Print outcomes to stdout.
    pub console: bool,
    /// Write the final report as JSON to this path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_path: Option<PathBuf>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            console: true,
            json_path: None,
        }
    }
}

/// Settings for one suite run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base URL every case path is resolved against.
    pub base_url: String,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
    /// Overall suite time limit in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_timeout_ms: Option<u64>,
    /// Seed for fixture generation; random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// `JsonLike` tolerances.
    pub like: LikeOptions,
    /// Reporter settings.
    pub report: ReportSettings,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            suite_timeout_ms: None,
            seed: None,
            like: LikeOptions::default(),
            report: ReportSettings::default(),
        }
    }
}
