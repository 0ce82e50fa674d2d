//! Validation reports.
//!
//! A `ContractReport` is the structured outcome of running one contract's
//! rules against a dataset. The runner creates it empty, appends a
//! `RuleResult` per non-passing rule, and the report is immutable
//! afterwards. Passing rules leave no trace; the report only lists
//! failures.

use crate::error::ContractError;
use crate::rule::Severity;
use crate::value::Row;
use serde::Serialize;

/// Outcome of evaluating one rule against a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct RuleResult {
    /// Identifier of the rule that produced this result
    pub rule_id: String,

    /// Severity of the violation
    pub severity: Severity,

    /// Human-readable description, including the uncapped violation count
    pub message: String,

    /// Sample of violating rows, copied from the dataset and bounded by the
    /// runner's sample cap; `None` for results with no row evidence
    /// (missing columns, unknown rule types)
    pub failed_rows: Option<Vec<Row>>,
}

/// Aggregate outcome of one contract run.
#[derive(Debug, Clone, Serialize)]
pub struct ContractReport {
    /// Name of the contract that was run (usually its file path)
    pub contract_name: String,

    /// Target dataset name from the contract document
    pub dataset: String,

    /// Contract version, when declared
    pub version: Option<String>,

    /// Per-rule results in compiled-rule order
    pub results: Vec<RuleResult>,
}

/// Serializable summary counts for a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Contract name
    pub contract: String,
    /// Dataset name
    pub dataset: String,
    /// Contract version
    pub version: Option<String>,
    /// Number of recorded results (failing rules only)
    pub results: usize,
    /// Number of error-severity results
    pub errors: usize,
    /// Number of warning-severity results
    pub warnings: usize,
}

impl ContractReport {
    /// Creates an empty report for one contract run.
    pub fn new(
        contract_name: impl Into<String>,
        dataset: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            contract_name: contract_name.into(),
            dataset: dataset.into(),
            version,
            results: Vec::new(),
        }
    }

    /// Appends a rule result.
    pub fn push(&mut self, result: RuleResult) {
        self.results.push(result);
    }

    /// Error-severity results, in result order.
    pub fn errors(&self) -> Vec<&RuleResult> {
        self.results
            .iter()
            .filter(|r| r.severity == Severity::Error)
            .collect()
    }

    /// Warning-severity results, in result order.
    pub fn warnings(&self) -> Vec<&RuleResult> {
        self.results
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .collect()
    }

    /// True when the report contains no error-severity results. Warnings do
    /// not affect this.
    pub fn is_ok(&self) -> bool {
        self.errors().is_empty()
    }

    /// Summary counts for logging and machine-readable output.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            contract: self.contract_name.clone(),
            dataset: self.dataset.clone(),
            version: self.version.clone(),
            results: self.results.len(),
            errors: self.errors().len(),
            warnings: self.warnings().len(),
        }
    }

    /// Escalates the report when strict mode is requested.
    ///
    /// Fails with [`ContractError::Violation`] when `strict` is true and at
    /// least one error-severity result exists, carrying one
    /// `[SEVERITY] rule_id: message` line per error in result order.
    /// Warnings never trigger the escalation.
    pub fn raise_if_strict(&self, strict: bool) -> Result<(), ContractError> {
        if strict && !self.is_ok() {
            let lines = self
                .errors()
                .iter()
                .map(|r| {
                    format!(
                        "[{}] {}: {}",
                        r.severity.as_str().to_uppercase(),
                        r.rule_id,
                        r.message
                    )
                })
                .collect();
            return Err(ContractError::Violation { lines });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(id: &str, severity: Severity) -> RuleResult {
        RuleResult {
            rule_id: id.to_string(),
            severity,
            message: format!("Rule failed: {id}"),
            failed_rows: None,
        }
    }

    fn report_with(results: Vec<RuleResult>) -> ContractReport {
        let mut report = ContractReport::new("customers.yml", "customers", Some("1.0".into()));
        for r in results {
            report.push(r);
        }
        report
    }

    #[test]
    fn test_empty_report_is_ok() {
        let report = report_with(vec![]);
        assert!(report.is_ok());
        assert!(report.raise_if_strict(true).is_ok());
    }

    #[test]
    fn test_errors_and_warnings_split() {
        let report = report_with(vec![
            result("A", Severity::Error),
            result("B", Severity::Warning),
            result("C", Severity::Error),
        ]);
        assert_eq!(report.errors().len(), 2);
        assert_eq!(report.warnings().len(), 1);
        assert!(!report.is_ok());
    }

    #[test]
    fn test_summary_counts() {
        let report = report_with(vec![
            result("A", Severity::Error),
            result("B", Severity::Warning),
        ]);
        let summary = report.summary();
        assert_eq!(summary.contract, "customers.yml");
        assert_eq!(summary.dataset, "customers");
        assert_eq!(summary.version.as_deref(), Some("1.0"));
        assert_eq!(summary.results, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 1);
    }

    #[test]
    fn test_warnings_never_escalate() {
        let report = report_with(vec![
            result("B", Severity::Warning),
            result("D", Severity::Warning),
        ]);
        assert!(report.is_ok());
        assert!(report.raise_if_strict(true).is_ok());
    }

    #[test]
    fn test_strict_escalation_one_line_per_error() {
        let report = report_with(vec![
            result("A", Severity::Error),
            result("B", Severity::Warning),
            result("C", Severity::Error),
        ]);

        assert!(report.raise_if_strict(false).is_ok());

        let err = report.raise_if_strict(true).unwrap_err();
        let message = err.to_string();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[ERROR] A:"));
        assert!(lines[1].starts_with("[ERROR] C:"));
    }
}
