//! # Migration Contracts SDK
//!
//! Public API facade for the Migration Contracts Engine. Domain pipelines
//! (customer merge, lockers/wearers, finishing methods, invoicing) depend
//! on this crate alone: it re-exports the core types, the loader and the
//! runner, and adds path-based convenience entry points for using the
//! engine as a validation gate between transformation steps.
//!
//! ## Example
//!
//! ```no_run
//! use mce_sdk::{Frame, RunOptions, validate_file};
//!
//! let frame = Frame::from_json_records(r#"[{"Customer Code": "C-1"}]"#).unwrap();
//! let report = validate_file(&frame, "contracts/customers.yml", &RunOptions::lenient())
//!     .unwrap();
//!
//! for result in report.errors() {
//!     eprintln!("{}: {}", result.rule_id, result.message);
//! }
//! ```

pub use mce_core::{
    ColumnSpec, ContractDoc, ContractError, ContractReport, ReportSummary, Row, Rule, RuleResult,
    RuleSpec, Severity, Value, compile_rules,
};
pub use mce_parser::{
    ContractFormat, ParserError, detect_format, load_contract, load_contracts_from_dir,
    parse_json, parse_yaml,
};
pub use mce_validator::{
    Dispatch, DispatchError, EngineError, Frame, FrameError, RowMask, RunOptions, run_contract,
    run_contract_with, run_contracts,
};

use std::path::Path;

/// Loads one contract file and runs it against a frame.
pub fn validate_file(
    frame: &Frame,
    contract_path: impl AsRef<Path>,
    options: &RunOptions,
) -> Result<ContractReport, EngineError> {
    let path = contract_path.as_ref();
    let doc = load_contract(path)?;
    let report = run_contract(frame, &doc, &path.display().to_string(), options)?;
    Ok(report)
}

/// Loads every contract under a directory and runs them against a frame.
///
/// Contracts execute in path order; like [`run_contracts`], the batch is
/// fail-fast under strict options.
pub fn validate_dir(
    frame: &Frame,
    contracts_dir: impl AsRef<Path>,
    options: &RunOptions,
) -> Result<Vec<ContractReport>, EngineError> {
    let contracts = load_contracts_from_dir(contracts_dir.as_ref())?;
    let mut reports = Vec::with_capacity(contracts.len());
    for (path, doc) in contracts {
        let report = run_contract(frame, &doc, &path.display().to_string(), options)?;
        reports.push(report);
    }
    Ok(reports)
}
