//! bq-should
//!
//! Assertions on BigQuery query results for automated tests.
//!
//! # Features
//!
//! - Cell-level conditions: declare the value expected at (row, column)
//! - One query execution per run, every condition evaluated independently
//! - Index-aligned error reporting, one slot per condition
//! - YAML suite files for running many test sets from the command line
//!
//! # Crates
//!
//! - `bqshould` - test sets, conditions, result grids and the executor trait
//! - `bqshould_bigquery` - executor backed by the BigQuery REST API
//!
//! # CLI Usage
//!
//! ```bash
//! # Run every test in a suite file
//! bq-should run --suite checks.yaml --key-path key.json --project-id my-project
//!
//! # Ad-hoc check of a single query
//! bq-should check --sql "SELECT COUNT(*) FROM [bigquery-public-data:hacker_news.comments]" \
//!   --expect "comments@0,0=8399417"
//! ```

pub mod expect;
pub mod suite;

pub use bqshould::{
    Condition, ExecutionError, QueryExecutor, ResultSet, StaticExecutor, TestError, TestFailure,
    TestOutcome, TestSet, Value,
};
pub use bqshould_bigquery::{BigQueryArgs, BigQueryConfig, BigQueryExecutor, SqlDialect};
pub use expect::Expectation;
pub use suite::{CaseReport, Suite, SuiteCase, SuiteCondition, SuiteError, SuiteReport};
