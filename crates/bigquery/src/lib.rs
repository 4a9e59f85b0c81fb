//! BigQuery query executor for `bqshould` test sets.
//!
//! Authenticates with a service-account key, submits each query as a
//! BigQuery job and hands the first page of rows back as string cells.
//!
//! # Example
//!
//! ```ignore
//! use bqshould::TestSet;
//! use bqshould_bigquery::{BigQueryConfig, BigQueryExecutor};
//!
//! let config = BigQueryConfig::from_env()?;
//! let executor = BigQueryExecutor::connect(config).await?;
//!
//! let mut set = TestSet::query("SELECT COUNT(*) FROM [bigquery-public-data:hacker_news.comments]");
//! set.should(0, 0).be_equal(8399417);
//! set.test_log(&executor).await;
//! ```

pub mod args;
pub mod cell;
pub mod config;
pub mod dialect;
pub mod duration;
pub mod executor;

pub use args::BigQueryArgs;
pub use config::{BigQueryConfig, ConfigError, KEY_PATH_ENV, PROJECT_ID_ENV};
pub use dialect::SqlDialect;
pub use duration::parse_duration;
pub use executor::{build_query_request, BigQueryExecutor};
