//! A single expected-value assertion on one result cell.

use crate::error::TestError;
use crate::result_set::ResultSet;
use crate::value::Value;

/// Expectation on the cell at (`row`, `col`).
///
/// Conditions are created through [`crate::TestSet::should`] and configured
/// with the chaining setters before the set is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    row: usize,
    col: usize,
    /// Expected cell text, fixed when the value is attached.
    expected: Option<String>,
    label: String,
}

impl Condition {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            expected: None,
            label: String::new(),
        }
    }

    /// Set the expected value. The value is converted to its cell text now,
    /// not at evaluation time.
    pub fn be_equal(&mut self, value: impl Into<Value>) -> &mut Self {
        self.expected = Some(value.into().to_cell_string());
        self
    }

    /// Set the label used in diagnostics.
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// Compare this condition against a result set.
    pub fn check(&self, result: &ResultSet) -> Result<(), TestError> {
        let expected = self
            .expected
            .as_deref()
            .ok_or_else(|| TestError::MissingExpectation {
                label: self.label.clone(),
                row: self.row,
                col: self.col,
            })?;

        let actual = result
            .cell(self.row, self.col)
            .map_err(|e| TestError::CoordinateOutOfRange {
                label: self.label.clone(),
                row: e.row,
                col: e.col,
                rows: e.rows,
                cols: e.cols,
            })?;

        if actual == expected {
            Ok(())
        } else {
            Err(TestError::Mismatch {
                label: self.label.clone(),
                row: self.row,
                col: self.col,
                actual: actual.to_string(),
                expected: expected.to_string(),
            })
        }
    }
}
