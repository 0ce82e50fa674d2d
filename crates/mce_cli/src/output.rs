use colored::*;
use mce_core::{ContractReport, Rule, Severity};
use serde_json::json;

pub fn print_report(report: &ContractReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &ContractReport) {
    println!("\n{}", "═".repeat(60));
    println!(
        "{}",
        format!(
            "  CONTRACT REPORT  {} (dataset: {})",
            report.contract_name, report.dataset
        )
        .bold()
    );
    println!("{}", "═".repeat(60));

    if report.is_ok() {
        println!("\n{} {}", "✓".green().bold(), "Contract OK".green().bold());
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Contract violated".red().bold()
        );
    }

    let errors = report.errors();
    if !errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, result) in errors.iter().enumerate() {
            println!(
                "  {}. {}: {}",
                i + 1,
                result.rule_id.red(),
                result.message.red()
            );
        }
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, result) in warnings.iter().enumerate() {
            println!(
                "  {}. {}: {}",
                i + 1,
                result.rule_id.yellow(),
                result.message.yellow()
            );
        }
    }

    let summary = report.summary();
    println!("\n{}", "Summary:".bold());
    println!("  Total results:  {}", summary.results);
    println!("  Total errors:   {}", summary.errors);
    println!("  Total warnings: {}", summary.warnings);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ContractReport) {
    let output = json!({
        "report": report,
        "summary": report.summary(),
        "passed": report.is_ok(),
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_compiled_rules(rules: &[Rule], format: &str) {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&rules).unwrap());
        return;
    }

    for rule in rules {
        let severity = match rule.severity {
            Severity::Error => rule.severity.as_str().red(),
            Severity::Warning => rule.severity.as_str().yellow(),
        };
        let columns = rule
            .referenced_columns()
            .join(", ");
        println!("  [{severity}] {}  {} on {columns}", rule.id.bold(), rule.kind);
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
