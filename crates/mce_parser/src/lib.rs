//! # Migration Contracts Parser
//!
//! Loader for contract documents in YAML and JSON formats.
//!
//! The format is selected by file extension; anything else fails with
//! [`ParserError::UnsupportedFormat`]. Loading is all-or-nothing: a missing
//! or malformed file is fatal and no partial contract is produced.
//!
//! # Example
//!
//! ```rust
//! use mce_parser::parse_yaml;
//!
//! let yaml = r#"
//! dataset: customers
//! version: "1.0"
//! rules:
//!   - id: VAT_LENGTH
//!     type: length_equals
//!     column: NIP / VAT Number
//!     equals: 10
//! "#;
//!
//! let doc = parse_yaml(yaml).expect("failed to parse contract");
//! assert_eq!(doc.dataset.as_deref(), Some("customers"));
//! ```

use mce_core::ContractDoc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading contract documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Contract file does not exist
    #[error("Contract file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported contract format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported contract file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl ContractFormat {
    /// Extensions recognized as contract files, lowercase.
    pub const EXTENSIONS: &[&str] = &["yaml", "yml", "json"];
}

/// Parse a contract document from a YAML string.
pub fn parse_yaml(content: &str) -> Result<ContractDoc> {
    let doc: ContractDoc = serde_yaml_ng::from_str(content)?;
    Ok(doc)
}

/// Parse a contract document from a JSON string.
pub fn parse_json(content: &str) -> Result<ContractDoc> {
    let doc: ContractDoc = serde_json::from_str(content)?;
    Ok(doc)
}

/// Detect the contract format from a file path based on its extension.
///
/// # Errors
///
/// Returns [`ParserError::InvalidExtension`] if the file has no extension
/// and [`ParserError::UnsupportedFormat`] if the extension is not
/// recognized.
pub fn detect_format(path: &Path) -> Result<ContractFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ContractFormat::Yaml),
        "json" => Ok(ContractFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Load a contract document from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use mce_parser::load_contract;
/// use std::path::Path;
///
/// let doc = load_contract(Path::new("contracts/customers.yml")).unwrap();
/// println!("Loaded contract for dataset: {}", doc.dataset_name());
/// ```
pub fn load_contract(path: &Path) -> Result<ContractDoc> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ParserError::FileNotFound(path.to_path_buf())
        } else {
            ParserError::Io(e)
        }
    })?;
    debug!(path = %path.display(), ?format, "loading contract");

    match format {
        ContractFormat::Yaml => parse_yaml(&content),
        ContractFormat::Json => parse_json(&content),
    }
}

/// Load every contract file under a directory, recursively.
///
/// Files are filtered by the supported extensions and returned in path
/// order, so batch diagnostics are deterministic. Any individual file that
/// fails to load fails the whole scan.
pub fn load_contracts_from_dir(dir: &Path) -> Result<Vec<(PathBuf, ContractDoc)>> {
    let mut paths = Vec::new();
    collect_contract_paths(dir, &mut paths)?;
    paths.sort();

    let mut contracts = Vec::with_capacity(paths.len());
    for path in paths {
        let doc = load_contract(&path)?;
        contracts.push((path, doc));
    }
    Ok(contracts)
}

fn collect_contract_paths(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_contract_paths(&path, paths)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ContractFormat::EXTENSIONS.contains(&ext.to_lowercase().as_str())
            })
        {
            paths.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_valid_yaml() {
        let yaml = r#"
dataset: customers
version: "1.0"
rules:
  - id: COUPLING_ALLOWED
    type: allowed_values
    column: Invoicing Coupling Code
    values: ["0001"]
columns:
  Customer Code:
    required: true
    unique: true
required_columns:
  - Customer Name
"#;

        let doc = parse_yaml(yaml).expect("failed to parse valid YAML");

        assert_eq!(doc.dataset.as_deref(), Some("customers"));
        assert_eq!(doc.version.as_deref(), Some("1.0"));
        assert_eq!(doc.rules.len(), 1);
        assert_eq!(doc.rules[0].id, "COUPLING_ALLOWED");
        assert_eq!(doc.columns.len(), 1);
        assert_eq!(doc.required_columns, vec!["Customer Name"]);
    }

    #[test]
    fn test_parse_valid_json() {
        let json = r#"{
            "domain": "invoicing",
            "rules": [
                {"id": "CLUSTER_REGEX", "type": "regex",
                 "column": "Invoicing Cluster", "pattern": "^[0-9]{4}$",
                 "severity": "warning"}
            ]
        }"#;

        let doc = parse_json(json).expect("failed to parse valid JSON");
        assert_eq!(doc.dataset.as_deref(), Some("invoicing"));
        assert_eq!(doc.rules[0].pattern.as_deref(), Some("^[0-9]{4}$"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_yaml("rules:\n  - id: [unbalanced\n");
        assert!(matches!(result.unwrap_err(), ParserError::Yaml(_)));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_json("{\"dataset\": ");
        assert!(matches!(result.unwrap_err(), ParserError::Json(_)));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("c.yaml")).unwrap(),
            ContractFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("c.YML")).unwrap(),
            ContractFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("c.json")).unwrap(),
            ContractFormat::Json
        );
    }

    #[test]
    fn test_detect_format_unsupported() {
        let result = detect_format(Path::new("contract.toml"));
        assert!(matches!(
            result.unwrap_err(),
            ParserError::UnsupportedFormat(ext) if ext == "toml"
        ));
    }

    #[test]
    fn test_detect_format_no_extension() {
        let result = detect_format(Path::new("contract"));
        assert!(matches!(result.unwrap_err(), ParserError::InvalidExtension));
    }

    #[test]
    fn test_load_contract_missing_file() {
        let result = load_contract(Path::new("no/such/contract.yml"));
        assert!(matches!(result.unwrap_err(), ParserError::FileNotFound(_)));
    }

    #[test]
    fn test_load_contract_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("customers.yml");
        fs::write(&path, "dataset: customers\nrequired_columns: [Name]\n").unwrap();

        let doc = load_contract(&path).unwrap();
        assert_eq!(doc.dataset.as_deref(), Some("customers"));
    }

    #[test]
    fn test_load_dir_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.yml"), "dataset: b\n").unwrap();
        fs::write(dir.path().join("a.json"), "{\"dataset\": \"a\"}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a contract").unwrap();
        fs::write(dir.path().join("nested/c.yaml"), "dataset: c\n").unwrap();

        let contracts = load_contracts_from_dir(dir.path()).unwrap();
        let datasets: Vec<&str> = contracts
            .iter()
            .map(|(_, doc)| doc.dataset.as_deref().unwrap())
            .collect();
        assert_eq!(datasets, ["a", "b", "c"]);
    }

    #[test]
    fn test_load_dir_malformed_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.yml"), "dataset: ok\n").unwrap();
        fs::write(dir.path().join("bad.yml"), "rules: [id: [\n").unwrap();

        assert!(load_contracts_from_dir(dir.path()).is_err());
    }
}
