//! Result of evaluating a test set.

use crate::error::{ExecutionError, TestError, TestFailure};

/// Outcome of [`crate::TestSet::test`].
///
/// When the query ran, `errors` has one slot per condition in declaration
/// order and a passing condition leaves its slot empty. When the query
/// failed, `errors` holds that single execution error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    /// True only when every slot of `errors` is empty.
    pub valid: bool,
    pub errors: Vec<Option<TestError>>,
}

impl TestOutcome {
    pub(crate) fn execution_failed(error: ExecutionError) -> Self {
        Self {
            valid: false,
            errors: vec![Some(TestError::Execution(error))],
        }
    }

    pub(crate) fn evaluated(errors: Vec<Option<TestError>>) -> Self {
        Self {
            valid: errors.iter().all(Option::is_none),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Non-empty slots with their index.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &TestError)> {
        self.errors
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (i, e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn execution_error(&self) -> Option<&ExecutionError> {
        self.failures().find_map(|(_, e)| match e {
            TestError::Execution(inner) => Some(inner),
            _ => None,
        })
    }

    /// One-line description of the outcome.
    pub fn summary(&self) -> String {
        if let Some(err) = self.execution_error() {
            return format!("query failed: {err}");
        }
        let total = self.errors.len();
        if self.valid {
            format!("{total} condition(s) passed")
        } else {
            format!("{} of {total} condition(s) failed", self.failure_count())
        }
    }

    /// Convert into a `Result`, collecting every failure line into the error.
    pub fn into_result(self) -> Result<(), TestFailure> {
        if self.valid {
            return Ok(());
        }
        let details = self
            .failures()
            .map(|(_, e)| e.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Err(TestFailure {
            summary: self.summary(),
            details,
        })
    }
}
