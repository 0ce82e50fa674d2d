//! Error types for contract compilation and strict escalation.

use thiserror::Error;

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// Errors produced by the contract engine.
///
/// Evaluation-time problems (missing columns, unknown rule types) are NOT
/// errors; they degrade to report entries so a run always produces a full
/// report. Only compilation of a malformed rule and the final strict
/// escalation fail.
#[derive(Debug, Error)]
pub enum ContractError {
    /// A rule of a known kind is missing a required field
    #[error("Invalid rule '{id}': {reason}")]
    InvalidRule {
        /// Rule identifier
        id: String,
        /// What is missing or malformed
        reason: String,
    },

    /// Strict-mode escalation: one line per error-severity result
    #[error("{}", .lines.join("\n"))]
    Violation {
        /// `[SEVERITY] rule_id: message` lines in result order
        lines: Vec<String>,
    },
}
