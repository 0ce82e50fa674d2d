//! Rule dispatch table and predicates.
//!
//! The dispatch table maps a rule-type identifier to a predicate that,
//! given a frame and a rule, returns a boolean mask of violating rows. The
//! registry is string-keyed on purpose: a rule whose kind has no entry is
//! not an error here, the runner reports it as an "Unknown rule type"
//! result. `column_present` is intentionally never registered; the runner
//! checks column presence before dispatch.

use crate::frame::Frame;
use mce_core::{Rule, Value, literal_to_text};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// One flag per row, true where the row violates the rule.
pub type RowMask = Vec<bool>;

/// A violation-detecting predicate.
pub type Predicate = Box<dyn Fn(&Frame, &Rule) -> Result<RowMask, DispatchError> + Send + Sync>;

/// Errors raised by a predicate that cannot evaluate its rule.
///
/// Compiled rules never trigger these (the compiler validates parameter
/// combinations); hand-built rules can. The runner degrades them to
/// error-severity report entries rather than aborting the run.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The rule lacks the parameter its kind requires
    #[error("Rule '{id}' is missing its '{parameter}' parameter")]
    MissingParameter {
        /// Rule identifier
        id: String,
        /// Name of the absent parameter
        parameter: &'static str,
    },

    /// The rule's regular expression does not compile
    #[error("Rule '{id}' has an invalid pattern: {error}")]
    InvalidPattern {
        /// Rule identifier
        id: String,
        /// Compilation failure detail
        error: String,
    },
}

/// Registry mapping rule-type identifiers to predicates.
pub struct Dispatch {
    predicates: HashMap<String, Predicate>,
}

impl Dispatch {
    /// Creates a dispatch table with the built-in predicates registered.
    pub fn new() -> Self {
        let mut dispatch = Self {
            predicates: HashMap::new(),
        };
        dispatch.register("not_null", Box::new(mask_not_null));
        dispatch.register("length_equals", Box::new(mask_length_not_equals));
        dispatch.register("allowed_values", Box::new(mask_not_allowed));
        dispatch.register("regex", Box::new(mask_regex_mismatch));
        dispatch.register("max_length", Box::new(mask_max_length_exceeded));
        dispatch.register("unique", Box::new(mask_duplicates));
        dispatch
    }

    /// Registers a predicate for a rule kind, replacing any existing one.
    pub fn register(&mut self, kind: impl Into<String>, predicate: Predicate) {
        self.predicates.insert(kind.into(), predicate);
    }

    /// Looks up the predicate for a rule kind; `None` for unknown kinds.
    pub fn lookup(&self, kind: &str) -> Option<&Predicate> {
        self.predicates.get(kind)
    }
}

impl Default for Dispatch {
    fn default() -> Self {
        Self::new()
    }
}

fn single_column<'a>(rule: &'a Rule) -> Result<&'a str, DispatchError> {
    rule.referenced_columns()
        .first()
        .copied()
        .ok_or_else(|| DispatchError::MissingParameter {
            id: rule.id.clone(),
            parameter: "column",
        })
}

/// Applies `violates` to every non-null cell of the rule's column; null
/// cells never violate content rules (nullability is `not_null`'s job).
fn mask_cells(
    frame: &Frame,
    rule: &Rule,
    violates: impl Fn(&Value) -> bool,
) -> Result<RowMask, DispatchError> {
    let column = single_column(rule)?;
    Ok((0..frame.len())
        .map(|row| {
            let cell = frame.get(row, column);
            !cell.is_null() && violates(cell)
        })
        .collect())
}

fn mask_not_null(frame: &Frame, rule: &Rule) -> Result<RowMask, DispatchError> {
    let column = single_column(rule)?;
    Ok((0..frame.len())
        .map(|row| frame.get(row, column).is_null())
        .collect())
}

fn mask_length_not_equals(frame: &Frame, rule: &Rule) -> Result<RowMask, DispatchError> {
    let expected = rule.equals.ok_or_else(|| DispatchError::MissingParameter {
        id: rule.id.clone(),
        parameter: "equals",
    })?;
    mask_cells(frame, rule, |cell| {
        cell.to_text().chars().count() != expected
    })
}

fn mask_not_allowed(frame: &Frame, rule: &Rule) -> Result<RowMask, DispatchError> {
    let values = rule
        .values
        .as_ref()
        .ok_or_else(|| DispatchError::MissingParameter {
            id: rule.id.clone(),
            parameter: "values",
        })?;
    let allowed: HashSet<String> = values.iter().map(literal_to_text).collect();
    mask_cells(frame, rule, |cell| !allowed.contains(&cell.to_text()))
}

/// Anchored-at-start match, deliberately not full-string: a value passes
/// when the pattern matches a prefix of it. Contracts relying on an exact
/// match must end their pattern with `$`.
fn mask_regex_mismatch(frame: &Frame, rule: &Rule) -> Result<RowMask, DispatchError> {
    let pattern = rule
        .pattern
        .as_ref()
        .ok_or_else(|| DispatchError::MissingParameter {
            id: rule.id.clone(),
            parameter: "pattern",
        })?;
    let regex =
        Regex::new(&format!("^(?:{pattern})")).map_err(|e| DispatchError::InvalidPattern {
            id: rule.id.clone(),
            error: e.to_string(),
        })?;
    mask_cells(frame, rule, |cell| !regex.is_match(&cell.to_text()))
}

fn mask_max_length_exceeded(frame: &Frame, rule: &Rule) -> Result<RowMask, DispatchError> {
    let max_length = rule
        .max_length
        .ok_or_else(|| DispatchError::MissingParameter {
            id: rule.id.clone(),
            parameter: "max_length",
        })?;
    mask_cells(frame, rule, |cell| {
        cell.to_text().chars().count() > max_length
    })
}

/// Flags EVERY row whose key tuple occurs more than once, not just the
/// occurrences after the first.
fn mask_duplicates(frame: &Frame, rule: &Rule) -> Result<RowMask, DispatchError> {
    let columns = rule.referenced_columns();
    if columns.is_empty() {
        return Err(DispatchError::MissingParameter {
            id: rule.id.clone(),
            parameter: "column",
        });
    }

    let keys: Vec<String> = (0..frame.len())
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let cell = frame.get(row, column);
                    if cell.is_null() {
                        "\u{0}".to_string()
                    } else {
                        cell.to_text()
                    }
                })
                .collect::<Vec<_>>()
                .join("\u{1f}")
        })
        .collect();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for key in &keys {
        *occurrences.entry(key).or_default() += 1;
    }

    Ok(keys.iter().map(|key| occurrences[key.as_str()] > 1).collect())
}
