use anyhow::{Context, Result};
use mce_core::ContractError;
use mce_parser::load_contract;
use mce_validator::{Frame, RunOptions, run_contract};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(
    contract_paths: &[String],
    data_path: &str,
    strict: bool,
    sample_cap: usize,
    format: &str,
) -> Result<()> {
    info!("Validating dataset: {}", data_path);
    info!("Strict mode: {}", strict);

    let records = std::fs::read_to_string(data_path)
        .with_context(|| format!("Failed to read dataset file: {data_path}"))?;
    let frame = Frame::from_json_records(&records)
        .with_context(|| format!("Failed to parse dataset records: {data_path}"))?;

    output::print_info(&format!(
        "Dataset loaded: {} row(s), {} column(s)",
        frame.len(),
        frame.columns().len()
    ));

    let options = RunOptions { strict, sample_cap };
    let mut all_ok = true;

    // Contracts run in argument order; under --strict the first violated
    // contract aborts the rest of the batch.
    for contract_path in contract_paths {
        let doc = load_contract(Path::new(contract_path))
            .with_context(|| format!("Failed to load contract file: {contract_path}"))?;

        match run_contract(&frame, &doc, contract_path, &options) {
            Ok(report) => {
                all_ok &= report.is_ok();
                output::print_report(&report, format);
            }
            Err(violation @ ContractError::Violation { .. }) => {
                output::print_error(&format!("Contract violated: {contract_path}"));
                eprintln!("{violation}");
                std::process::exit(1);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to run contract: {contract_path}"));
            }
        }
    }

    if !all_ok {
        std::process::exit(1);
    }

    Ok(())
}
