//! Column-major tables for the data pipeline
//!
//! Two small frame types carry data through the stages: [`RawFrame`] holds
//! string cells straight from CSV or a JSON request, [`NumFrame`] holds
//! coerced numeric cells where `None` is the explicit null. Both keep their
//! column order stable; downstream feature ordering depends on it.

use crate::error::{Error, Result};

/// Table of raw string cells with ordered, named columns.
///
/// Storage is column-major: `cells[col][row]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    columns: Vec<String>,
    cells: Vec<Vec<String>>,
}

impl RawFrame {
    /// Build a frame from a header and row-major records.
    ///
    /// Every row must have exactly one cell per column.
    pub fn from_rows(columns: Vec<String>, rows: &[Vec<String>]) -> Result<Self> {
        let width = columns.len();
        let mut cells: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); width];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::Data(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
            for (col, cell) in row.iter().enumerate() {
                cells[col].push(cell.clone());
            }
        }
        Ok(Self { columns, cells })
    }

    /// Build a single-row frame from a JSON object.
    ///
    /// Only the declared columns are read; unknown keys in the record are
    /// ignored and missing declared keys become empty cells (null after
    /// cleaning). Numbers and strings are taken as-is, booleans map to 1/0,
    /// anything else is treated as absent.
    pub fn from_record(columns: &[String], record: &serde_json::Map<String, serde_json::Value>) -> Self {
        let cells = columns
            .iter()
            .map(|name| {
                let cell = match record.get(name) {
                    Some(serde_json::Value::Number(n)) => n.to_string(),
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(serde_json::Value::Bool(b)) => if *b { "1" } else { "0" }.to_string(),
                    _ => String::new(),
                };
                vec![cell]
            })
            .collect();
        Self {
            columns: columns.to_vec(),
            cells,
        }
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Cells of a column by name
    pub fn column(&self, name: &str) -> Option<&[String]> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(&self.cells[idx])
    }

    /// New frame containing only the given rows, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|col| indices.iter().map(|&i| col[i].clone()).collect())
            .collect();
        Self {
            columns: self.columns.clone(),
            cells,
        }
    }

    /// New frame without the named column (no-op when absent)
    pub fn drop_column(&self, name: &str) -> Self {
        let mut columns = Vec::with_capacity(self.columns.len());
        let mut cells = Vec::with_capacity(self.cells.len());
        for (col, data) in self.columns.iter().zip(&self.cells) {
            if col != name {
                columns.push(col.clone());
                cells.push(data.clone());
            }
        }
        Self { columns, cells }
    }
}

/// Table of numeric cells with ordered, named columns.
///
/// `None` marks a missing value. Storage is column-major. The row count is
/// carried explicitly so a frame whose columns were all dropped still knows
/// how many records it represents.
#[derive(Debug, Clone, PartialEq)]
pub struct NumFrame {
    columns: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
    n_rows: usize,
}

impl NumFrame {
    /// Empty frame with a fixed row count, ready for `push_column`
    pub fn with_rows(n_rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            cells: Vec::new(),
            n_rows,
        }
    }

    /// Append a column. The cell count must match the frame's row count.
    pub fn push_column(&mut self, name: impl Into<String>, cells: Vec<Option<f64>>) -> Result<()> {
        if cells.len() != self.n_rows {
            return Err(Error::Data(format!(
                "column has {} cells, frame has {} rows",
                cells.len(),
                self.n_rows
            )));
        }
        let name = name.into();
        if self.columns.contains(&name) {
            return Err(Error::Data(format!("duplicate column '{name}'")));
        }
        self.columns.push(name);
        self.cells.push(cells);
        Ok(())
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Cells of a column by name
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(&self.cells[idx])
    }

    /// Whether the named column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Iterate `(name, cells)` pairs in column order
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawFrame {
        RawFrame::from_rows(
            vec!["age".to_string(), "sex".to_string()],
            &[
                vec!["63".to_string(), "1".to_string()],
                vec!["41".to_string(), "0".to_string()],
                vec!["?".to_string(), "1".to_string()],
            ],
        )
        .expect("valid frame")
    }

    #[test]
    fn test_from_rows_shape() {
        let frame = sample_raw();
        assert_eq!(frame.n_rows(), 3);
        assert_eq!(frame.n_cols(), 2);
        assert_eq!(frame.column("age").unwrap()[2], "?");
        assert!(frame.column("missing").is_none());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = RawFrame::from_rows(
            vec!["a".to_string(), "b".to_string()],
            &[vec!["1".to_string()]],
        );
        assert!(matches!(err, Err(Error::Data(_))));
    }

    #[test]
    fn test_from_record_ignores_unknown_and_fills_missing() {
        let columns = vec!["age".to_string(), "sex".to_string()];
        let record = serde_json::json!({"age": 57, "bogus": 9, "sex": null});
        let frame = RawFrame::from_record(&columns, record.as_object().unwrap());
        assert_eq!(frame.n_rows(), 1);
        assert_eq!(frame.column("age").unwrap()[0], "57");
        // null and missing both land as empty cells
        assert_eq!(frame.column("sex").unwrap()[0], "");
    }

    #[test]
    fn test_select_rows_and_drop_column() {
        let frame = sample_raw();
        let sub = frame.select_rows(&[2, 0]);
        assert_eq!(sub.column("age").unwrap(), &["?".to_string(), "63".to_string()]);
        let dropped = frame.drop_column("sex");
        assert_eq!(dropped.columns(), &["age".to_string()]);
        assert_eq!(dropped.n_rows(), 3);
    }

    #[test]
    fn test_num_frame_push_and_lookup() {
        let mut frame = NumFrame::with_rows(2);
        frame.push_column("a", vec![Some(1.0), None]).unwrap();
        frame.push_column("b", vec![Some(3.0), Some(4.0)]).unwrap();
        assert_eq!(frame.n_rows(), 2);
        assert_eq!(frame.column("a").unwrap()[1], None);
        assert!(frame.push_column("a", vec![None, None]).is_err());
        assert!(frame.push_column("c", vec![None]).is_err());
    }
}
