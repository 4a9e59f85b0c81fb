//! CLI argument definitions for the BigQuery executor.

use crate::config::{BigQueryConfig, ConfigError};
use crate::dialect::SqlDialect;
use crate::duration::parse_duration;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for connecting to BigQuery.
#[derive(Args, Clone, Debug)]
pub struct BigQueryArgs {
    /// Path to the service-account key file (JSON)
    #[arg(long, env = "GOOGLE_KEY_PATH")]
    pub key_path: Option<PathBuf>,

    /// Project that runs the query jobs
    #[arg(long, env = "GOOGLE_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Dialect for queries without a #standardSQL / #legacySQL directive
    #[arg(long, default_value = "legacy")]
    pub dialect: SqlDialect,

    /// Job location (e.g. US, EU)
    #[arg(long, env = "BIGQUERY_LOCATION")]
    pub location: Option<String>,

    /// Maximum time to wait for a query job (e.g. 30s, 5m, 1h)
    #[arg(long, default_value = "60s", value_parser = parse_duration)]
    pub timeout: Duration,
}

impl TryFrom<&BigQueryArgs> for BigQueryConfig {
    type Error = ConfigError;

    fn try_from(args: &BigQueryArgs) -> Result<Self, Self::Error> {
        let key_path = args
            .key_path
            .clone()
            .ok_or(ConfigError::Missing(crate::config::KEY_PATH_ENV))?;
        let project_id = args
            .project_id
            .clone()
            .ok_or(ConfigError::Missing(crate::config::PROJECT_ID_ENV))?;

        let mut config = BigQueryConfig::new(key_path, project_id)
            .with_default_dialect(args.dialect)
            .with_timeout(args.timeout);
        if let Some(location) = &args.location {
            config = config.with_location(location.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        bigquery: BigQueryArgs,
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = TestCli::try_parse_from([
            "test",
            "--key-path",
            "/keys/sa.json",
            "--project-id",
            "my-project",
            "--dialect",
            "standard",
            "--location",
            "EU",
            "--timeout",
            "5m",
        ])
        .unwrap();

        let config = BigQueryConfig::try_from(&cli.bigquery).unwrap();
        assert_eq!(config.key_path, PathBuf::from("/keys/sa.json"));
        assert_eq!(config.project_id, "my-project");
        assert_eq!(config.default_dialect, SqlDialect::Standard);
        assert_eq!(config.location.as_deref(), Some("EU"));
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_missing_key_path_is_config_error() {
        let args = BigQueryArgs {
            key_path: None,
            project_id: Some("p".to_string()),
            dialect: SqlDialect::Legacy,
            location: None,
            timeout: Duration::from_secs(60),
        };
        assert_eq!(
            BigQueryConfig::try_from(&args).unwrap_err(),
            ConfigError::Missing("GOOGLE_KEY_PATH")
        );
    }

    #[test]
    fn test_invalid_timeout_rejected_by_parser() {
        let result = TestCli::try_parse_from(["test", "--timeout", "soon"]);
        assert!(result.is_err());
    }
}
