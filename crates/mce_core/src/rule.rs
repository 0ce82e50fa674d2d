//! Rule types.
//!
//! A `Rule` is one concrete, parameterized validation check compiled from a
//! contract document. Rules are immutable value objects; the runner and the
//! dispatch table only ever read them.

use crate::error::ContractError;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Severity of a rule violation.
///
/// Errors block strict runs; warnings are reported and never block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Blocks strict runs
    #[default]
    Error,
    /// Reported, never blocks
    Warning,
}

impl Severity {
    /// Lowercase name, as written in contract documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    /// Case-insensitive: contracts in the wild write "error", "ERROR" and
    /// "Warning" interchangeably.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            other => Err(D::Error::custom(format!(
                "unknown severity '{other}', expected 'error' or 'warning'"
            ))),
        }
    }
}

/// One compiled validation check.
///
/// The `kind` identifier is kept as written in the document: a kind with no
/// registered predicate is still a well-formed rule and surfaces as an
/// "Unknown rule type" result at run time instead of failing compilation.
///
/// Exactly one of the type-specific parameter fields is populated, matching
/// `kind`; [`Rule::validate`] enforces the required combinations for the
/// known kinds.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Rule {
    /// Identifier, unique within a contract (not globally enforced)
    pub id: String,

    /// Violation severity
    pub severity: Severity,

    /// Rule-type identifier (e.g. "not_null", "unique")
    pub kind: String,

    /// Single column reference
    pub column: Option<String>,

    /// Ordered multi-column reference, for checks spanning several columns
    pub columns: Option<Vec<String>>,

    /// Allowed literals, for `allowed_values`
    pub values: Option<Vec<serde_json::Value>>,

    /// Expected text length, for `length_equals`
    pub equals: Option<usize>,

    /// Regular expression, for `regex`
    pub pattern: Option<String>,

    /// Upper text-length bound, for `max_length`
    pub max_length: Option<usize>,
}

/// Rule kinds with a built-in predicate.
pub const KNOWN_KINDS: &[&str] = &[
    "not_null",
    "length_equals",
    "allowed_values",
    "regex",
    "max_length",
    "unique",
    "column_present",
];

impl Rule {
    /// The columns this rule reads: `columns` when present, else `column`.
    pub fn referenced_columns(&self) -> Vec<&str> {
        if let Some(columns) = &self.columns {
            columns.iter().map(String::as_str).collect()
        } else if let Some(column) = &self.column {
            vec![column.as_str()]
        } else {
            Vec::new()
        }
    }

    /// Checks the required field combinations for the known kinds.
    ///
    /// Unknown kinds pass unchecked; they are reported by the runner, not
    /// rejected at compile time.
    pub fn validate(&self) -> Result<(), ContractError> {
        if !KNOWN_KINDS.contains(&self.kind.as_str()) {
            return Ok(());
        }

        if self.referenced_columns().is_empty() {
            return Err(self.invalid("no column or columns reference"));
        }

        match self.kind.as_str() {
            "length_equals" if self.equals.is_none() => {
                Err(self.invalid("missing 'equals' parameter"))
            }
            "allowed_values" if self.values.is_none() => {
                Err(self.invalid("missing 'values' parameter"))
            }
            "max_length" if self.max_length.is_none() => {
                Err(self.invalid("missing 'max_length' parameter"))
            }
            "regex" => match &self.pattern {
                None => Err(self.invalid("missing 'pattern' parameter")),
                Some(pattern) => Regex::new(pattern)
                    .map(|_| ())
                    .map_err(|e| self.invalid(format!("invalid pattern: {e}"))),
            },
            "column_present" if self.column.is_none() => {
                Err(self.invalid("requires a single 'column' reference"))
            }
            _ => Ok(()),
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ContractError {
        ContractError::InvalidRule {
            id: self.id.clone(),
            reason: reason.into(),
        }
    }
}
