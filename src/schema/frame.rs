//! Raw provider tables
//!
//! A [`RawFrame`] is the untyped tabular result a source adapter returns:
//! ordered provider-native column names plus rows of loosely typed cells.
//! Nothing outside the normalizer interprets the cell contents.

use thiserror::Error;

/// Errors building a raw frame
#[derive(Error, Debug)]
pub enum RawFrameError {
    #[error("Row has {got} cells, frame has {expected} columns")]
    ColumnCount { expected: usize, got: usize },
}

/// One loosely typed table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Missing value
    Null,
    /// Textual value (dates, decimal strings, scientific notation)
    Text(String),
    /// Numeric value as delivered by a JSON payload
    Float(f64),
}

impl RawValue {
    /// Whether this cell is missing
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Textual cell from anything string-like
    pub fn text(value: impl Into<String>) -> Self {
        RawValue::Text(value.into())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<Option<f64>> for RawValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => RawValue::Float(v),
            None => RawValue::Null,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// Raw tabular provider result
///
/// Column names are provider-native; row arity is enforced on construction.
#[derive(Debug, Clone, Default)]
pub struct RawFrame {
    columns: Vec<String>,
    rows: Vec<Vec<RawValue>>,
}

impl RawFrame {
    /// Create an empty frame with the given column names
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a frame from pre-built rows, validating arity once
    pub fn with_rows<I, S>(columns: I, rows: Vec<Vec<RawValue>>) -> Result<Self, RawFrameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut frame = Self::new(columns);
        for row in rows {
            frame.push_row(row)?;
        }
        Ok(frame)
    }

    /// Append one row; its cell count must match the column count
    pub fn push_row(&mut self, row: Vec<RawValue>) -> Result<(), RawFrameError> {
        if row.len() != self.columns.len() {
            return Err(RawFrameError::ColumnCount {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All rows, in insertion order
    pub fn rows(&self) -> &[Vec<RawValue>] {
        &self.rows
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&RawValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_row_arity() {
        let mut frame = RawFrame::new(["a", "b"]);
        assert!(frame
            .push_row(vec![RawValue::Float(1.0), RawValue::Null])
            .is_ok());
        assert!(frame.push_row(vec![RawValue::Float(1.0)]).is_err());
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn test_column_access() {
        let frame = RawFrame::with_rows(
            ["date", "close"],
            vec![
                vec![RawValue::text("2024-01-01"), RawValue::Float(10.0)],
                vec![RawValue::text("2024-01-02"), RawValue::Null],
            ],
        )
        .unwrap();

        assert!(frame.has_column("close"));
        assert!(!frame.has_column("volume"));

        let close = frame.column("close").unwrap();
        assert_eq!(close.len(), 2);
        assert_eq!(close[0], &RawValue::Float(10.0));
        assert!(close[1].is_null());
    }
}
