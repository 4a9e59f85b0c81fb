//! The query execution seam.

use crate::error::ExecutionError;
use crate::result_set::ResultSet;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Runs SQL and returns its rows as string cells.
///
/// Implementations own everything about reaching the service: credentials,
/// client setup, job submission and fetching results.
#[async_trait::async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute `sql` and return the result grid.
    async fn execute(&self, sql: &str) -> Result<ResultSet, ExecutionError>;
}

/// In-memory executor with canned responses.
///
/// Answers exact SQL matches from its table first, then falls back to the
/// default response. Counts every call.
#[derive(Debug, Default)]
pub struct StaticExecutor {
    default: Option<Result<ResultSet, ExecutionError>>,
    by_query: HashMap<String, Result<ResultSet, ExecutionError>>,
    calls: AtomicUsize,
}

impl StaticExecutor {
    /// Answer every query with `result`.
    pub fn new(result: ResultSet) -> Self {
        Self {
            default: Some(Ok(result)),
            ..Default::default()
        }
    }

    /// Fail every query with `error`.
    pub fn failing(error: ExecutionError) -> Self {
        Self {
            default: Some(Err(error)),
            ..Default::default()
        }
    }

    /// Answer `sql` with `result`.
    pub fn with_query(mut self, sql: impl Into<String>, result: ResultSet) -> Self {
        self.by_query.insert(sql.into(), Ok(result));
        self
    }

    /// Fail `sql` with `error`.
    pub fn with_failing_query(mut self, sql: impl Into<String>, error: ExecutionError) -> Self {
        self.by_query.insert(sql.into(), Err(error));
        self
    }

    /// Number of `execute` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl QueryExecutor for StaticExecutor {
    async fn execute(&self, sql: &str) -> Result<ResultSet, ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.by_query
            .get(sql)
            .or(self.default.as_ref())
            .cloned()
            .unwrap_or_else(|| {
                Err(ExecutionError::Query(format!(
                    "no canned response for query: {sql}"
                )))
            })
    }
}
