//! Rule compilation.
//!
//! Expands a contract document's declarative shorthand into the flat,
//! ordered rule list the runner executes. Order is fixed so diagnostics are
//! reproducible: explicit `rules` first, then the `columns` block in
//! document order, then `required_columns`.

use crate::contract::ContractDoc;
use crate::error::ContractError;
use crate::rule::{Rule, Severity};

/// Compiles a contract document into concrete rules.
///
/// The compiler does not cross-check sections against each other: a column
/// may appear both in `rules` and `columns`, and the duplicate checks all
/// run independently. Malformed rules of a known kind (missing parameter,
/// bad pattern) fail compilation with [`ContractError::InvalidRule`];
/// unknown kinds compile fine and surface when run.
pub fn compile_rules(doc: &ContractDoc) -> Result<Vec<Rule>, ContractError> {
    let mut rules = Vec::new();

    for spec in &doc.rules {
        rules.push(Rule {
            id: spec.id.clone(),
            severity: spec.severity,
            kind: spec.kind.clone(),
            column: spec.column.clone(),
            columns: spec.columns.clone(),
            values: spec.values.clone(),
            equals: spec.equals,
            pattern: spec.pattern.clone(),
            max_length: spec.max_length,
        });
    }

    for (column, spec) in &doc.columns {
        let severity = spec.severity.unwrap_or(Severity::Error);

        if spec.required == Some(true) {
            rules.push(Rule {
                id: format!("{column}__REQUIRED"),
                severity,
                kind: "not_null".to_string(),
                column: Some(column.clone()),
                ..Default::default()
            });
        }

        if spec.unique == Some(true) {
            rules.push(Rule {
                id: format!("{column}__UNIQUE"),
                severity,
                kind: "unique".to_string(),
                column: Some(column.clone()),
                ..Default::default()
            });
        }

        if let Some(max_length) = spec.max_length {
            rules.push(Rule {
                id: format!("{column}__MAX_LENGTH"),
                severity: spec.severity.unwrap_or(Severity::Warning),
                kind: "max_length".to_string(),
                column: Some(column.clone()),
                max_length: Some(max_length),
                ..Default::default()
            });
        }

        if let Some(values) = &spec.allowed_values {
            rules.push(Rule {
                id: format!("{column}__ALLOWED"),
                severity,
                kind: "allowed_values".to_string(),
                column: Some(column.clone()),
                values: Some(values.clone()),
                ..Default::default()
            });
        }
    }

    // Column presence is never advisory.
    for column in &doc.required_columns {
        rules.push(Rule {
            id: format!("{column}__PRESENT"),
            severity: Severity::Error,
            kind: "column_present".to_string(),
            column: Some(column.clone()),
            ..Default::default()
        });
    }

    for rule in &rules {
        rule.validate()?;
    }

    Ok(rules)
}
