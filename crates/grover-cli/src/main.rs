//! Grover search command-line interface.
//!
//! ```text
//! grover search 011 100 --shots 10000 --seed 7
//! grover circuit 0110 --format qasm
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{backends, circuit, search, version};
use config::RunOverrides;

/// Grover - amplitude-amplified search over n-qubit bitstrings
#[derive(Parser, Debug)]
#[command(name = "grover")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a search circuit, run it and report the outcome distribution
    Search {
        /// Marked bitstrings, most significant bit first (e.g. 011 100)
        #[arg(required = true)]
        states: Vec<String>,

        /// Number of shots [default: 10000]
        #[arg(short, long)]
        shots: Option<u32>,

        /// Backend to use [default: simulator]
        #[arg(short, long)]
        backend: Option<String>,

        /// Sampling seed for reproducible counts
        #[arg(long)]
        seed: Option<u64>,

        /// Grover rounds (defaults to the optimal count)
        #[arg(short, long, allow_negative_numbers = true)]
        iterations: Option<i64>,

        /// YAML run configuration
        #[arg(short, long, env = "GROVER_CONFIG")]
        config: Option<PathBuf>,

        /// Print the generated QASM3
        #[arg(long)]
        show_qasm: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },

    /// Build a search circuit and print it without running
    Circuit {
        /// Marked bitstrings, most significant bit first
        #[arg(required = true)]
        states: Vec<String>,

        /// Grover rounds (defaults to the optimal count)
        #[arg(short, long, allow_negative_numbers = true)]
        iterations: Option<i64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = CircuitFormat::Summary)]
        format: CircuitFormat,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

/// Output of the `search` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
}

/// Output of the `circuit` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CircuitFormat {
    Summary,
    Qasm,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG takes precedence over -v.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Search {
            states,
            shots,
            backend,
            seed,
            iterations,
            config,
            show_qasm,
            format,
        } => {
            let overrides = RunOverrides {
                shots,
                backend,
                seed,
            };
            search::execute(
                &states,
                iterations,
                config.as_deref(),
                &overrides,
                show_qasm,
                format,
            )
            .await
        }

        Commands::Circuit {
            states,
            iterations,
            format,
        } => circuit::execute(&states, iterations, format),

        Commands::Backends => backends::execute().await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
