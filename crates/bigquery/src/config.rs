//! BigQuery executor configuration.

use crate::dialect::SqlDialect;
use bqshould::ExecutionError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the service-account key file path.
pub const KEY_PATH_ENV: &str = "GOOGLE_KEY_PATH";

/// Environment variable holding the project that runs query jobs.
pub const PROJECT_ID_ENV: &str = "GOOGLE_PROJECT_ID";

/// How long a query may run before the executor gives up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors building a [`BigQueryConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was not provided.
    #[error("Missing setting: {0}")]
    Missing(&'static str),

    /// A setting was provided but is empty.
    #[error("Setting must not be empty: {0}")]
    Empty(&'static str),

    /// A setting could not be parsed.
    #[error("Invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

impl From<ConfigError> for ExecutionError {
    fn from(err: ConfigError) -> Self {
        ExecutionError::Config(err.to_string())
    }
}

/// Settings for [`crate::BigQueryExecutor`].
///
/// Passed explicitly at construction; the executor never reads process
/// state on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigQueryConfig {
    /// Path to a service-account key in JSON format.
    pub key_path: PathBuf,

    /// Project that query jobs are billed to and run in.
    pub project_id: String,

    /// Dialect for queries without a `#standardSQL` / `#legacySQL` directive.
    pub default_dialect: SqlDialect,

    /// Job location (e.g. `US`, `EU`). `None` lets BigQuery decide.
    pub location: Option<String>,

    /// Upper bound on waiting for a query job to finish.
    pub timeout: Duration,
}

impl BigQueryConfig {
    pub fn new(key_path: impl Into<PathBuf>, project_id: impl Into<String>) -> Self {
        Self {
            key_path: key_path.into(),
            project_id: project_id.into(),
            default_dialect: SqlDialect::default(),
            location: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_default_dialect(mut self, dialect: SqlDialect) -> Self {
        self.default_dialect = dialect;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from `GOOGLE_KEY_PATH` and `GOOGLE_PROJECT_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_path = lookup(KEY_PATH_ENV).ok_or(ConfigError::Missing(KEY_PATH_ENV))?;
        let project_id = lookup(PROJECT_ID_ENV).ok_or(ConfigError::Missing(PROJECT_ID_ENV))?;
        let config = Self::new(key_path, project_id);
        config.validate()?;
        Ok(config)
    }

    /// Check that required settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_path.as_os_str().is_empty() {
            return Err(ConfigError::Empty(KEY_PATH_ENV));
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Empty(PROJECT_ID_ENV));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "timeout",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
