//! # Migration Contracts Validator
//!
//! Rule execution engine for the Migration Contracts Engine. This crate
//! evaluates compiled contract rules against in-memory tabular frames:
//!
//! - Frame: named columns over owned rows, read-only to the engine
//! - Dispatch: registry mapping rule kinds to violation predicates
//! - Runner: per-rule evaluation, report assembly, strict escalation
//!
//! Passing rules are silent; the report only lists failures. Missing
//! columns and unknown rule types become report entries rather than
//! aborting the run, so one run always yields the full picture.
//!
//! ## Example
//!
//! ```rust
//! use mce_validator::{Frame, RunOptions, run_contract};
//!
//! let frame = Frame::from_json_records(
//!     r#"[{"Invoicing Coupling Code": "0001"},
//!         {"Invoicing Coupling Code": "BAD"}]"#,
//! )
//! .unwrap();
//!
//! let doc: mce_core::ContractDoc = serde_json::from_str(
//!     r#"{
//!         "dataset": "customers",
//!         "columns": {
//!             "Invoicing Coupling Code": {"allowed_values": ["0001"]}
//!         }
//!     }"#,
//! )
//! .unwrap();
//!
//! let report = run_contract(&frame, &doc, "inline", &RunOptions::lenient()).unwrap();
//! assert!(!report.is_ok());
//! assert_eq!(report.summary().errors, 1);
//! ```

mod dispatch;
mod frame;
mod runner;

pub use dispatch::{Dispatch, DispatchError, Predicate, RowMask};
pub use frame::{Frame, FrameError};
pub use runner::{EngineError, RunOptions, run_contract, run_contract_with, run_contracts};
