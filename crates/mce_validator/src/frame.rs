//! In-memory tabular datasets.
//!
//! A `Frame` is the dataset shape the engine validates: named columns over
//! owned rows. The engine treats frames as read-only; the only copying is
//! the explicit failed-row sampling step, so a report stays valid even if
//! the caller later rebuilds its dataset.

use mce_core::{Row, Value};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors building a frame from external records.
#[derive(Debug, Error)]
pub enum FrameError {
    /// JSON parsing failed
    #[error("Failed to parse JSON records: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level JSON value is not an array of objects
    #[error("Expected a JSON array of record objects")]
    NotRecords,

    /// A record field holds a nested structure
    #[error("Unsupported {kind} value for column '{column}' in record {index}")]
    UnsupportedValue {
        /// Column name
        column: String,
        /// Zero-based record index
        index: usize,
        /// Offending JSON type name
        kind: &'static str,
    },
}

static NULL: Value = Value::Null;

/// A dataset of named columns over owned rows.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Frame {
    /// Creates a frame with an explicit column list.
    ///
    /// A column may be declared without any row carrying it; such cells
    /// read as null.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Creates an empty frame with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a frame from rows, deriving the column list as the sorted
    /// union of row keys.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns: BTreeSet<String> = rows
            .iter()
            .flat_map(|row| row.keys().cloned())
            .collect();
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    /// Creates a frame from a JSON array of flat record objects.
    ///
    /// Nested arrays and objects are rejected; migration datasets are flat
    /// tables.
    pub fn from_json_records(content: &str) -> Result<Self, FrameError> {
        let parsed: serde_json::Value = serde_json::from_str(content)?;
        let records = parsed.as_array().ok_or(FrameError::NotRecords)?;

        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or(FrameError::NotRecords)?;
            let mut row = Row::new();
            for (column, value) in object {
                let cell = match value {
                    serde_json::Value::Null => Value::Null,
                    serde_json::Value::Bool(b) => Value::Bool(*b),
                    serde_json::Value::Number(n) => match n.as_i64() {
                        Some(i) => Value::Int(i),
                        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
                    },
                    serde_json::Value::String(s) => Value::String(s.clone()),
                    serde_json::Value::Array(_) => {
                        return Err(FrameError::UnsupportedValue {
                            column: column.clone(),
                            index,
                            kind: "array",
                        });
                    }
                    serde_json::Value::Object(_) => {
                        return Err(FrameError::UnsupportedValue {
                            column: column.clone(),
                            index,
                            kind: "object",
                        });
                    }
                };
                row.insert(column.clone(), cell);
            }
            rows.push(row);
        }

        Ok(Self::from_rows(rows))
    }

    /// The frame's column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// True when the frame declares the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Reads a cell; absent keys read as null.
    pub fn get(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// Copies the rows flagged in `mask`, keeping the first `cap` in
    /// original row order.
    pub fn filter_rows(&self, mask: &[bool], cap: usize) -> Vec<Row> {
        self.rows
            .iter()
            .zip(mask)
            .filter(|(_, flagged)| **flagged)
            .map(|(row, _)| row.clone())
            .take(cap)
            .collect()
    }
}

impl FromIterator<Row> for Frame {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
