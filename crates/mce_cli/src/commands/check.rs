use anyhow::{Context, Result};
use mce_core::compile_rules;
use mce_parser::load_contract;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(contract_paths: &[String], format: &str) -> Result<()> {
    for contract_path in contract_paths {
        info!("Checking contract: {}", contract_path);

        let doc = load_contract(Path::new(contract_path))
            .with_context(|| format!("Failed to load contract file: {contract_path}"))?;
        let rules = compile_rules(&doc)
            .with_context(|| format!("Failed to compile contract: {contract_path}"))?;

        output::print_info(&format!(
            "Contract loaded: {} (dataset: {}, version: {})",
            contract_path,
            doc.dataset_name(),
            doc.version.as_deref().unwrap_or("N/A")
        ));
        output::print_success(&format!("Compiled {} rule(s)", rules.len()));
        output::print_compiled_rules(&rules, format);
    }

    Ok(())
}
