//! # Migration Contracts Core
//!
//! Core types and the rule compiler for the Migration Contracts Engine.
//!
//! A contract is a declarative document specifying validation rules for a
//! named tabular dataset. This crate models the document
//! ([`ContractDoc`]), compiles it into a flat ordered list of concrete
//! [`Rule`]s, and defines the structured outcome of a run
//! ([`ContractReport`]). Executing rules against data lives in the
//! validator crate; parsing documents from files lives in the parser crate.
//!
//! ## Key Concepts
//!
//! - **Contract**: declarative document of rules and column constraints
//! - **Rule**: one concrete, parameterized check compiled from a contract
//! - **Severity**: error (blocks strict runs) or warning (never blocks)
//! - **Report**: per-rule results; passing rules are silent
//!
//! ## Example
//!
//! ```rust
//! use mce_core::compile_rules;
//!
//! let doc: mce_core::ContractDoc = serde_json::from_str(
//!     r#"{
//!         "dataset": "customers",
//!         "columns": {"Customer Code": {"required": true, "unique": true}},
//!         "required_columns": ["Customer Name"]
//!     }"#,
//! )
//! .unwrap();
//!
//! let rules = compile_rules(&doc).unwrap();
//! let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
//! assert_eq!(ids, [
//!     "Customer Code__REQUIRED",
//!     "Customer Code__UNIQUE",
//!     "Customer Name__PRESENT",
//! ]);
//! ```

pub mod compile;
pub mod contract;
pub mod error;
pub mod report;
pub mod rule;
pub mod value;

pub use compile::compile_rules;
pub use contract::{ColumnSpec, ContractDoc, RuleSpec};
pub use error::{ContractError, Result};
pub use report::{ContractReport, ReportSummary, RuleResult};
pub use rule::{KNOWN_KINDS, Rule, Severity};
pub use value::{Row, Value, literal_to_text};
