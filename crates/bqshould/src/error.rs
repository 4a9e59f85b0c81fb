//! Error types for query execution and condition evaluation.

use std::time::Duration;
use thiserror::Error;

/// The query could not be executed or its results could not be retrieved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// Missing or invalid executor configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credentials could not be read or were rejected.
    #[error("Credential error: {0}")]
    Credentials(String),

    /// The service client could not be created.
    #[error("Client error: {0}")]
    Client(String),

    /// The service rejected or failed the query.
    #[error("Query error: {0}")]
    Query(String),

    /// The query job did not finish in time.
    #[error("Query did not complete within {0:?}")]
    Timeout(Duration),
}

/// One entry of a test outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// Query execution failed; no condition was evaluated.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// The observed cell differs from the expected value.
    #[error("{label}: ({row},{col}) is {actual}, should be {expected}")]
    Mismatch {
        label: String,
        row: usize,
        col: usize,
        actual: String,
        expected: String,
    },

    /// The condition points outside the returned grid.
    #[error("{label}: ({row},{col}) is out of range for a result of {rows} rows x {cols} columns")]
    CoordinateOutOfRange {
        label: String,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// The condition was declared without an expected value.
    #[error("{label}: ({row},{col}) has no expected value")]
    MissingExpectation { label: String, row: usize, col: usize },
}

impl TestError {
    pub fn is_execution(&self) -> bool {
        matches!(self, TestError::Execution(_))
    }

    /// Coordinates of the condition this error belongs to, if any.
    pub fn coordinates(&self) -> Option<(usize, usize)> {
        match self {
            TestError::Execution(_) => None,
            TestError::Mismatch { row, col, .. }
            | TestError::CoordinateOutOfRange { row, col, .. }
            | TestError::MissingExpectation { row, col, .. } => Some((*row, *col)),
        }
    }
}

/// Returned by [`crate::TestOutcome::into_result`] when a run did not pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{summary}\n{details}")]
pub struct TestFailure {
    pub summary: String,
    /// One line per failing entry.
    pub details: String,
}
