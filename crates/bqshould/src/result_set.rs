//! Tabular query results.

use thiserror::Error;

/// A requested cell lies outside the result grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cell ({row},{col}) is out of range for a result of {rows} rows x {cols} columns")]
pub struct CellOutOfRange {
    pub row: usize,
    pub col: usize,
    /// Number of rows in the result.
    pub rows: usize,
    /// Width of the requested row, or of the first row when `row` itself is
    /// out of range.
    pub cols: usize,
}

/// A grid of string-valued cells indexed `[row][col]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a single cell.
    pub fn cell(&self, row: usize, col: usize) -> Result<&str, CellOutOfRange> {
        let out_of_range = |cols: usize| CellOutOfRange {
            row,
            col,
            rows: self.rows.len(),
            cols,
        };

        let cells = match self.rows.get(row) {
            Some(cells) => cells,
            None => return Err(out_of_range(self.rows.first().map_or(0, Vec::len))),
        };
        cells
            .get(col)
            .map(String::as_str)
            .ok_or_else(|| out_of_range(cells.len()))
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl<R, C> FromIterator<R> for ResultSet
where
    R: IntoIterator<Item = C>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}
