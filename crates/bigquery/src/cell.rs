//! Conversion from BigQuery REST rows to string cells.

use bqshould::ResultSet;
use gcp_bigquery_client::model::table_cell::TableCell;
use gcp_bigquery_client::model::table_row::TableRow;

/// Text used for `NULL` cells. Matches how `bqshould::Value::Null` renders.
pub const NULL_CELL: &str = "NULL";

/// Render a single cell as text.
///
/// The REST API returns scalars as JSON strings, so most cells pass through
/// unchanged. Nested RECORD / REPEATED values are rendered as compact JSON.
pub fn cell_to_string(cell: &TableCell) -> String {
    match &cell.value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        Some(serde_json::Value::Null) | None => NULL_CELL.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Build a result set from a page of rows.
pub fn rows_to_result_set(rows: Option<&[TableRow]>) -> ResultSet {
    let rows = rows.unwrap_or_default();
    ResultSet::new(
        rows.iter()
            .map(|row| {
                row.columns
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(cell_to_string)
                    .collect()
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> TableRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_scalar_cells() {
        let r = row(json!({"f": [{"v": "8399417"}, {"v": null}, {"v": true}, {"v": 1.5}]}));
        let rs = rows_to_result_set(Some(&[r]));
        assert_eq!(rs.cell(0, 0).unwrap(), "8399417");
        assert_eq!(rs.cell(0, 1).unwrap(), "NULL");
        assert_eq!(rs.cell(0, 2).unwrap(), "true");
        assert_eq!(rs.cell(0, 3).unwrap(), "1.5");
    }

    #[test]
    fn test_nested_cells_render_as_json() {
        let r = row(json!({"f": [{"v": [{"v": "a"}, {"v": "b"}]}]}));
        let rs = rows_to_result_set(Some(&[r]));
        assert_eq!(rs.cell(0, 0).unwrap(), r#"[{"v":"a"},{"v":"b"}]"#);
    }

    #[test]
    fn test_missing_rows_is_empty_result() {
        assert!(rows_to_result_set(None).is_empty());
    }

    #[test]
    fn test_multiple_rows_keep_order() {
        let rows = vec![
            row(json!({"f": [{"v": "1"}, {"v": "one"}]})),
            row(json!({"f": [{"v": "2"}, {"v": "two"}]})),
        ];
        let rs = rows_to_result_set(Some(&rows));
        assert_eq!(rs.num_rows(), 2);
        assert_eq!(rs.cell(1, 1).unwrap(), "two");
    }
}
