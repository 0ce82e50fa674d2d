use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the mce binary
#[allow(deprecated)]
fn mce() -> Command {
    Command::cargo_bin("mce").expect("Failed to find mce binary")
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_valid_contract() {
    mce()
        .arg("check")
        .arg(fixture_path("customers.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("customers"))
        .stdout(predicate::str::contains("VAT_LENGTH"))
        .stdout(predicate::str::contains("Customer Code__REQUIRED"))
        .stdout(predicate::str::contains("Customer Name__PRESENT"));
}

#[test]
fn test_check_reports_compiled_rule_count() {
    // 3 explicit rules + required + unique + column_present
    mce()
        .arg("check")
        .arg(fixture_path("customers.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("6 rule(s)"));
}

#[test]
fn test_check_json_output() {
    let output = mce()
        .arg("check")
        .arg("--format")
        .arg("json")
        .arg(fixture_path("customers.yml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output_str = String::from_utf8_lossy(&output);

    // Output may have logs before JSON, extract the JSON part
    let json_start = output_str.find('[').expect("Should contain JSON array");
    let json_part = &output_str[json_start..];

    let rules: serde_json::Value =
        serde_json::from_str(json_part).expect("Output should be valid JSON");
    assert_eq!(rules.as_array().unwrap().len(), 6);
}

#[test]
fn test_check_invalid_contract() {
    mce()
        .arg("check")
        .arg(fixture_path("invalid_contract.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_check_missing_file() {
    mce()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_check_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contract.toml");
    fs::write(&path, "dataset = 'x'").unwrap();

    mce()
        .arg("check")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported"));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_clean_dataset_passes() {
    mce()
        .arg("validate")
        .arg("--data")
        .arg(fixture_path("clean_records.json"))
        .arg(fixture_path("customers.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Contract OK"));
}

#[test]
fn test_validate_dirty_dataset_fails() {
    mce()
        .arg("validate")
        .arg("--data")
        .arg(fixture_path("dirty_records.json"))
        .arg(fixture_path("customers.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Contract violated"))
        .stdout(predicate::str::contains("VAT_LENGTH"))
        .stdout(predicate::str::contains("COUPLING_ALLOWED"))
        .stdout(predicate::str::contains("CLUSTER_REGEX"));
}

#[test]
fn test_validate_strict_prints_error_lines() {
    mce()
        .arg("validate")
        .arg("--strict")
        .arg("--data")
        .arg(fixture_path("dirty_records.json"))
        .arg(fixture_path("customers.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("[ERROR] VAT_LENGTH:"))
        .stderr(predicate::str::contains("[ERROR] COUPLING_ALLOWED:"));
}

#[test]
fn test_validate_json_output() {
    let output = mce()
        .arg("validate")
        .arg("--format")
        .arg("json")
        .arg("--data")
        .arg(fixture_path("dirty_records.json"))
        .arg(fixture_path("customers.yml"))
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let output_str = String::from_utf8_lossy(&output);

    let json_start = output_str.find('{').expect("Should contain JSON object");
    let json_part = &output_str[json_start..];

    let parsed: serde_json::Value =
        serde_json::from_str(json_part).expect("Output should be valid JSON");
    assert_eq!(parsed["passed"], serde_json::json!(false));
    assert_eq!(parsed["summary"]["warnings"], serde_json::json!(1));
}

#[test]
fn test_validate_sample_cap() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("rows.json");
    let records: Vec<String> = (0..60)
        .map(|_| r#"{"Invoicing Coupling Code": "BAD"}"#.to_string())
        .collect();
    fs::write(&data, format!("[{}]", records.join(","))).unwrap();

    let contract = temp_dir.path().join("codes.yml");
    fs::write(
        &contract,
        "columns:\n  Invoicing Coupling Code:\n    allowed_values: ['0001']\n",
    )
    .unwrap();

    mce()
        .arg("validate")
        .arg("--sample-cap")
        .arg("5")
        .arg("--data")
        .arg(data.to_str().unwrap())
        .arg(contract.to_str().unwrap())
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed_rows=60"));
}

#[test]
fn test_validate_missing_data_file() {
    mce()
        .arg("validate")
        .arg("--data")
        .arg("nonexistent.json")
        .arg(fixture_path("customers.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_validate_malformed_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("rows.json");
    fs::write(&data, "{\"not\": \"an array\"}").unwrap();

    mce()
        .arg("validate")
        .arg("--data")
        .arg(data.to_str().unwrap())
        .arg(fixture_path("customers.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// General CLI tests
// ============================================================================

#[test]
fn test_cli_help() {
    mce()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_cli_version() {
    mce()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_help() {
    mce()
        .arg("validate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("strict"))
        .stdout(predicate::str::contains("sample-cap"))
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("data"));
}
