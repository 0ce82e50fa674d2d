//! Contract runner.
//!
//! Executes a compiled contract against a frame and assembles the report.
//! The runner never aborts mid-scan: missing columns, unknown rule types
//! and predicate failures all degrade to report entries, so a run always
//! produces the complete picture. The only late failure is the strict
//! escalation, raised once after every rule has been evaluated.

use crate::dispatch::Dispatch;
use crate::frame::Frame;
use mce_core::{
    ContractDoc, ContractError, ContractReport, Rule, RuleResult, Severity, compile_rules,
};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from a batch run: loading or running a contract failed.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A contract file failed to load
    #[error(transparent)]
    Parse(#[from] mce_parser::ParserError),

    /// Compilation failed or a strict run escalated
    #[error(transparent)]
    Contract(#[from] ContractError),
}

/// Options for a contract run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Fail after the report is assembled when it contains errors
    pub strict: bool,

    /// Upper bound on sampled failing rows per result; the reported
    /// violation count is never capped
    pub sample_cap: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            strict: true,
            sample_cap: 50,
        }
    }
}

impl RunOptions {
    /// Options with strict mode disabled.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }
}

/// Runs one contract against a frame with the built-in dispatch table.
///
/// Fails with [`ContractError::InvalidRule`] if the contract does not
/// compile, and with [`ContractError::Violation`] when `options.strict` is
/// set and the finished report contains error-severity results.
pub fn run_contract(
    frame: &Frame,
    doc: &ContractDoc,
    contract_name: &str,
    options: &RunOptions,
) -> Result<ContractReport, ContractError> {
    run_contract_with(frame, doc, contract_name, options, &Dispatch::new())
}

/// Runs one contract with a caller-supplied dispatch table.
pub fn run_contract_with(
    frame: &Frame,
    doc: &ContractDoc,
    contract_name: &str,
    options: &RunOptions,
    dispatch: &Dispatch,
) -> Result<ContractReport, ContractError> {
    let mut report = ContractReport::new(contract_name, doc.dataset_name(), doc.version.clone());
    let rules = compile_rules(doc)?;
    debug!(
        contract = contract_name,
        rules = rules.len(),
        rows = frame.len(),
        "running contract"
    );

    for rule in &rules {
        evaluate_rule(frame, rule, options, dispatch, &mut report);
    }

    let summary = report.summary();
    info!(
        contract = contract_name,
        errors = summary.errors,
        warnings = summary.warnings,
        "contract run finished"
    );

    report.raise_if_strict(options.strict)?;
    Ok(report)
}

fn evaluate_rule(
    frame: &Frame,
    rule: &Rule,
    options: &RunOptions,
    dispatch: &Dispatch,
    report: &mut ContractReport,
) {
    // Column presence is checked here, not in the dispatch table; a present
    // column leaves no trace in the report.
    if rule.kind == "column_present" {
        let column = rule.column.as_deref().unwrap_or_default();
        if !frame.has_column(column) {
            report.push(RuleResult {
                rule_id: rule.id.clone(),
                severity: rule.severity,
                message: format!("Missing required column: {column}"),
                failed_rows: None,
            });
        }
        return;
    }

    let referenced = rule.referenced_columns();
    let missing: Vec<&str> = referenced
        .iter()
        .copied()
        .filter(|column| !frame.has_column(column))
        .collect();
    if !missing.is_empty() {
        report.push(RuleResult {
            rule_id: rule.id.clone(),
            severity: rule.severity,
            message: format!("Column(s) not found for rule: {missing:?}"),
            failed_rows: None,
        });
        return;
    }

    let Some(predicate) = dispatch.lookup(&rule.kind) else {
        // Forced to error severity: an unexecutable rule is never advisory.
        report.push(RuleResult {
            rule_id: rule.id.clone(),
            severity: Severity::Error,
            message: format!("Unknown rule type: {}", rule.kind),
            failed_rows: None,
        });
        return;
    };

    let mask = match predicate(frame, rule) {
        Ok(mask) => mask,
        Err(e) => {
            report.push(RuleResult {
                rule_id: rule.id.clone(),
                severity: Severity::Error,
                message: format!("Rule evaluation failed: {e}"),
                failed_rows: None,
            });
            return;
        }
    };

    let violations = mask.iter().filter(|flag| **flag).count();
    if violations == 0 {
        return;
    }

    let failed_rows = frame.filter_rows(&mask, options.sample_cap);
    report.push(RuleResult {
        rule_id: rule.id.clone(),
        severity: rule.severity,
        message: format!(
            "Rule failed: {} on {} (failed_rows={violations})",
            rule.kind,
            describe_columns(rule)
        ),
        failed_rows: Some(failed_rows),
    });
}

fn describe_columns(rule: &Rule) -> String {
    match (&rule.column, &rule.columns) {
        (_, Some(columns)) => format!("{columns:?}"),
        (Some(column), None) => column.clone(),
        (None, None) => "<no column>".to_string(),
    }
}

/// Runs the same frame against several contract files sequentially.
///
/// Contracts are loaded through the loader and executed in the given
/// order, each producing its own report under the same options. The batch
/// is fail-fast: a load failure or a strict escalation aborts the
/// remaining contracts.
pub fn run_contracts<P: AsRef<Path>>(
    frame: &Frame,
    contract_paths: &[P],
    options: &RunOptions,
) -> Result<Vec<ContractReport>, EngineError> {
    let mut reports = Vec::with_capacity(contract_paths.len());
    for path in contract_paths {
        let path = path.as_ref();
        let doc = mce_parser::load_contract(path)?;
        let report = run_contract(frame, &doc, &path.display().to_string(), options)?;
        reports.push(report);
    }
    Ok(reports)
}
