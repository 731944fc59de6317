//! Harness configuration loading.
//!
//! Configuration comes from three layers, later ones winning:
//! built-in defaults, an optional YAML file named by `PROBE_CONFIG`, and
//! individual environment overrides.

use std::fmt;
use std::path::{Path, PathBuf};

use probe_domain::{DomainError, HarnessConfig};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Names the YAML configuration file.
pub const ENV_CONFIG: &str = "PROBE_CONFIG";
/// Overrides `base_url`.
pub const ENV_BASE_URL: &str = "PROBE_BASE_URL";
/// Overrides `timeout_ms`.
pub const ENV_TIMEOUT_MS: &str = "PROBE_TIMEOUT_MS";
/// Overrides `suite_timeout_ms`.
pub const ENV_SUITE_TIMEOUT_MS: &str = "PROBE_SUITE_TIMEOUT_MS";
/// Overrides `seed`.
pub const ENV_SEED: &str = "PROBE_SEED";
/// Overrides `report.json_path`.
pub const ENV_REPORT_JSON: &str = "PROBE_REPORT_JSON";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for `HarnessConfig`.
    #[error("failed to parse config file {path}: {source}")]
    Yaml {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An environment override has an unusable value.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The merged configuration is invalid.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Loads [`HarnessConfig`] from file and environment.
pub struct ConfigLoader {
    env: EnvLookup,
}

impl ConfigLoader {
    /// Creates a loader reading the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_env(|name| std::env::var(name).ok())
    }

    /// Creates a loader with a custom environment lookup.
    #[must_use]
    pub fn with_env(env: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self { env: Box::new(env) }
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an override is
    /// malformed, or the result fails validation.
    pub fn load(&self) -> Result<HarnessConfig, ConfigError> {
        let mut config = match self.var(ENV_CONFIG) {
            Some(path) => Self::load_file(Path::new(&path))?,
            None => HarnessConfig::default(),
        };
        self.apply_overrides(&mut config)?;
        validate(&config)?;
        Ok(config)
    }

    /// Reads a YAML configuration file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<HarnessConfig, ConfigError> {
        debug!(path = %path.display(), "loading config file");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(HarnessConfig::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_overrides(&self, config: &mut HarnessConfig) -> Result<(), ConfigError> {
        if let Some(base_url) = self.var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(timeout_ms) = self.parsed::<u64>(ENV_TIMEOUT_MS)? {
            config.timeout_ms = timeout_ms;
        }
        if let Some(suite_timeout_ms) = self.parsed::<u64>(ENV_SUITE_TIMEOUT_MS)? {
            config.suite_timeout_ms = Some(suite_timeout_ms);
        }
        if let Some(seed) = self.parsed::<u64>(ENV_SEED)? {
            config.seed = Some(seed);
        }
        if let Some(path) = self.var(ENV_REPORT_JSON) {
            config.report.json_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Returns a non-empty, trimmed variable value.
    fn var(&self, name: &str) -> Option<String> {
        (self.env)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn parsed<T>(&self, name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        self.var(name)
            .map(|value| {
                value.parse().map_err(|e: T::Err| ConfigError::InvalidEnv {
                    name,
                    reason: e.to_string(),
                    value,
                })
            })
            .transpose()
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader").finish_non_exhaustive()
    }
}

/// Checks the merged configuration.
///
/// # Errors
///
/// Returns `DomainError::InvalidUrl` for a base URL that is not absolute
/// http(s), `DomainError::InvalidTimeout` for a zero timeout, and
/// `DomainError::InvalidTolerance` for a negative or NaN `like.epsilon`.
pub fn validate(config: &HarnessConfig) -> Result<(), DomainError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", config.base_url)))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(DomainError::InvalidUrl(config.base_url.clone()));
    }
    if config.timeout_ms == 0 {
        return Err(DomainError::InvalidTimeout(0));
    }
    if config.suite_timeout_ms == Some(0) {
        return Err(DomainError::InvalidTimeout(0));
    }
    if config.like.epsilon.is_nan() || config.like.epsilon < 0.0 {
        return Err(DomainError::InvalidTolerance(config.like.epsilon.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn loader(vars: &[(&str, &str)]) -> ConfigLoader {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ConfigLoader::with_env(move |name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = loader(&[]).load().expect("defaults are valid");
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_file_then_env_overrides() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "base_url: http://localhost:8080\n\
             timeout_ms: 5000\n\
             seed: 7\n\
             like:\n  ignore_case: false\n\
             report:\n  console: false"
        )
        .expect("write config");
        let path = file.path().to_string_lossy().to_string();

        let config = loader(&[
            (ENV_CONFIG, path.as_str()),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_REPORT_JSON, "out/report.json"),
        ])
        .load()
        .expect("config loads");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.seed, Some(7));
        assert!(!config.like.ignore_case);
        assert!(config.like.normalize_whitespace);
        assert!(!config.report.console);
        assert_eq!(config.report.json_path, Some(PathBuf::from("out/report.json")));
    }

    #[test]
    fn test_suite_timeout_and_seed_from_env() {
        let config = loader(&[(ENV_SUITE_TIMEOUT_MS, "60000"), (ENV_SEED, " 42 ")])
            .load()
            .expect("config loads");
        assert_eq!(config.suite_timeout_ms, Some(60_000));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_env_value() {
        let error = loader(&[(ENV_TIMEOUT_MS, "soon")]).load().expect_err("not a number");
        assert!(matches!(error, ConfigError::InvalidEnv { name: ENV_TIMEOUT_MS, .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let error = loader(&[(ENV_TIMEOUT_MS, "0")]).load().expect_err("zero timeout");
        assert!(matches!(error, ConfigError::Invalid(DomainError::InvalidTimeout(0))));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let error = loader(&[(ENV_BASE_URL, "ftp://example.com")])
            .load()
            .expect_err("ftp is not http");
        assert!(matches!(error, ConfigError::Invalid(DomainError::InvalidUrl(_))));

        let error = loader(&[(ENV_BASE_URL, "not a url")]).load().expect_err("unparsable");
        assert!(matches!(error, ConfigError::Invalid(DomainError::InvalidUrl(_))));
    }

    #[test]
    fn test_bad_epsilon_rejected() {
        for epsilon in ["-0.5", ".nan"] {
            let mut file = tempfile::NamedTempFile::new().expect("temp file");
            writeln!(file, "like:\n  epsilon: {epsilon}").expect("write config");
            let path = file.path().to_string_lossy().to_string();

            let error = loader(&[(ENV_CONFIG, path.as_str())])
                .load()
                .expect_err("epsilon must be a non-negative number");
            assert!(matches!(error, ConfigError::Invalid(DomainError::InvalidTolerance(_))));
        }
    }

    #[test]
    fn test_zero_epsilon_accepted() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "like:\n  epsilon: 0.0").expect("write config");
        let path = file.path().to_string_lossy().to_string();

        let config = loader(&[(ENV_CONFIG, path.as_str())]).load().expect("config loads");
        assert!(config.like.epsilon.abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file() {
        let error = loader(&[(ENV_CONFIG, "/nonexistent/probe.yaml")])
            .load()
            .expect_err("file does not exist");
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "timeout_ms: [1, 2").expect("write config");
        let error = ConfigLoader::load_file(file.path()).expect_err("bad yaml");
        assert!(matches!(error, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let config = ConfigLoader::load_file(file.path()).expect("empty file is fine");
        assert_eq!(config, HarnessConfig::default());
    }
}
