//! Declarative contract documents.
//!
//! A contract is a structured document (YAML or JSON) declaring validation
//! rules for one dataset. The document is a compilation input only; after
//! [`compile_rules`](crate::compile::compile_rules) produces the flat rule
//! list, the document is not consulted again.

use crate::rule::Severity;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// A parsed contract document.
///
/// All sections are optional; an empty document compiles to zero rules.
///
/// # Example
///
/// ```rust
/// let doc: mce_core::ContractDoc = serde_json::from_str(
///     r#"{
///         "dataset": "customers",
///         "version": "1.0",
///         "rules": [
///             {"id": "VAT_LENGTH", "type": "length_equals",
///              "column": "NIP / VAT Number", "equals": 10}
///         ]
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(doc.dataset.as_deref(), Some("customers"));
/// assert_eq!(doc.rules.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractDoc {
    /// Target dataset name ("domain" is an accepted synonym)
    #[serde(default, alias = "domain")]
    pub dataset: Option<String>,

    /// Contract version; numeric scalars are accepted and stringified
    #[serde(default, deserialize_with = "version_scalar")]
    pub version: Option<String>,

    /// Explicit rule descriptors, in document order
    #[serde(default)]
    pub rules: Vec<RuleSpec>,

    /// Per-column constraint shorthand, in document order
    #[serde(default)]
    pub columns: IndexMap<String, ColumnSpec>,

    /// Columns that must exist in the dataset
    #[serde(default)]
    pub required_columns: Vec<String>,
}

impl ContractDoc {
    /// Dataset name for reports, `"<unknown>"` when the document omits it.
    pub fn dataset_name(&self) -> String {
        self.dataset
            .clone()
            .unwrap_or_else(|| "<unknown>".to_string())
    }
}

/// One explicit rule descriptor from the `rules` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    /// Rule identifier
    pub id: String,

    /// Violation severity, defaults to error
    #[serde(default)]
    pub severity: Severity,

    /// Rule-type identifier, taken as-is
    #[serde(rename = "type")]
    pub kind: String,

    /// Single column reference
    #[serde(default)]
    pub column: Option<String>,

    /// Ordered multi-column reference
    #[serde(default)]
    pub columns: Option<Vec<String>>,

    /// Allowed literals, for `allowed_values`
    #[serde(default)]
    pub values: Option<Vec<serde_json::Value>>,

    /// Expected text length, for `length_equals`
    #[serde(default)]
    pub equals: Option<usize>,

    /// Regular expression, for `regex`
    #[serde(default)]
    pub pattern: Option<String>,

    /// Upper text-length bound, for `max_length`
    #[serde(default)]
    pub max_length: Option<usize>,
}

/// Constraint shorthand for one column in the `columns` section.
///
/// Each present key expands to one rule; `severity` applies to every rule
/// synthesized for the column (default error, except `max_length` which
/// defaults to warning).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnSpec {
    /// Expand to a `not_null` rule when true
    #[serde(default)]
    pub required: Option<bool>,

    /// Expand to a `unique` rule when true
    #[serde(default)]
    pub unique: Option<bool>,

    /// Expand to a `max_length` rule
    #[serde(default)]
    pub max_length: Option<usize>,

    /// Expand to an `allowed_values` rule
    #[serde(default)]
    pub allowed_values: Option<Vec<serde_json::Value>>,

    /// Severity for the synthesized rules
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Accepts `version: "1.0"` and `version: 1.0` alike.
fn version_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
