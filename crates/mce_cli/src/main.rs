mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mce")]
#[command(version, about = "Migration Contracts Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and compile contracts without validating data
    Check {
        /// Paths to contract files (YAML or JSON)
        #[arg(required = true)]
        contracts: Vec<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a dataset against one or more contracts
    Validate {
        /// Paths to contract files (YAML or JSON), run in order
        #[arg(required = true)]
        contracts: Vec<String>,

        /// Path to the dataset, a JSON array of flat record objects
        #[arg(short, long)]
        data: String,

        /// Abort after the first contract whose report contains errors
        #[arg(short, long)]
        strict: bool,

        /// Maximum failing rows sampled per rule result
        #[arg(long, default_value_t = 50)]
        sample_cap: usize,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_ansi(false)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Check { contracts, format } => commands::check::execute(&contracts, &format),

        Commands::Validate {
            contracts,
            data,
            strict,
            sample_cap,
            format,
        } => commands::validate::execute(&contracts, &data, strict, sample_cap, &format),
    }
}
