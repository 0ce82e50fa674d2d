//! Cell values and rows.
//!
//! This module provides the value model for tabular records handed to the
//! engine. Rules compare cells by canonical text, so `Value` carries an
//! explicit text coercion alongside the usual accessors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single cell value in a dataset.
///
/// Represents the scalar types that appear in migration records. Nested
/// structures are not part of the model; datasets are flat tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical text form of this value, used by every text-comparing
    /// rule (length, allowed values, regex).
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int64",
            Value::Float(_) => "float64",
            Value::String(_) => "string",
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A single row of data, keyed by column name.
///
/// An ordered map so sampled rows serialize deterministically in reports.
pub type Row = BTreeMap<String, Value>;

/// Canonical text form of a contract literal (an `allowed_values` entry).
///
/// Contract documents may spell literals as strings, numbers, or booleans;
/// comparisons against cells are text-equal on both sides.
pub fn literal_to_text(literal: &serde_json::Value) -> String {
    match literal {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
