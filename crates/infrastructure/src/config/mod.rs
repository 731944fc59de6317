//! Configuration loading from YAML files and environment variables.

mod loader;

pub use loader::{
    ConfigError, ConfigLoader, ENV_BASE_URL, ENV_CONFIG, ENV_REPORT_JSON, ENV_SEED,
    ENV_SUITE_TIMEOUT_MS, ENV_TIMEOUT_MS, validate,
};
