//! Search command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::info;

use grover_hal::{Counts, Distribution, execute as execute_circuit};
use grover_qasm3::emit_with_comments;
use grover_search::{CircuitSummary, build_with_iterations, success_probability};

use super::common::{
    backend_registry, print_counts, print_header, print_result, print_search_overview,
    print_section, qasm_comments, spinner,
};
use crate::ReportFormat;
use crate::config::{RunConfig, RunOverrides};

/// Machine-readable search report.
#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    marked_states: &'a [String],
    num_qubits: u32,
    optimal_iterations: u64,
    iterations: u64,
    backend: &'a str,
    shots: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    summary: CircuitSummary,
    theoretical_success: f64,
    observed_success: f64,
    counts: &'a Counts,
    distribution: &'a Distribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    qasm: Option<String>,
}

/// Execute the search command.
pub async fn execute(
    states: &[String],
    iterations: Option<i64>,
    config_file: Option<&Path>,
    overrides: &RunOverrides,
    show_qasm: bool,
    format: ReportFormat,
) -> Result<()> {
    let registry = backend_registry();
    let config = RunConfig::load(config_file, overrides, &registry.available_backends())
        .context("failed to load run configuration")?;

    let search = build_with_iterations(states, iterations)?;
    let circuit = search.circuit.circuit();
    let rounds = search.circuit.iterations();
    let theoretical = success_probability(search.num_qubits, states.len() as u64, rounds);
    let qasm = show_qasm.then(|| emit_with_comments(circuit, &qasm_comments(states, &search)));

    let backend = registry
        .create(config.backend_config())
        .with_context(|| format!("failed to create backend '{}'", config.backend))?;
    let avail = backend.availability().await?;
    if !avail.is_available {
        let reason = avail
            .status_message
            .unwrap_or_else(|| "no reason given".to_string());
        anyhow::bail!("Backend '{}' is not available: {reason}", config.backend);
    }

    let table = format == ReportFormat::Table;
    if table {
        print_header("Grover Search");
        print_search_overview(states, &search);
        if let Some(qasm) = &qasm {
            print_section("QASM3");
            print!("{qasm}");
        }
        println!();
        println!(
            "{} Running on {} ({} shots)",
            style("→").cyan().bold(),
            style(&config.backend).yellow(),
            config.shots
        );
    }

    let progress = if table {
        Some(spinner("Sampling...")?)
    } else {
        None
    };
    let result = execute_circuit(backend.as_ref(), circuit, config.shots).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let result = result.with_context(|| format!("sampling on '{}' failed", config.backend))?;

    let distribution = Distribution::from_counts(&result.counts);
    let observed = distribution.mass(states);
    info!(
        backend = %config.backend,
        shots = config.shots,
        observed,
        theoretical,
        "Search finished"
    );

    match format {
        ReportFormat::Table => {
            print_section(&format!("Results ({} shots)", result.shots));
            print_counts(&result.counts, states);

            println!();
            print_result("Marked-state probability", format!("{:.2}%", observed * 100.0));
            print_result("Theoretical success", format!("{:.2}%", theoretical * 100.0));
            if let Some((bits, count)) = result.counts.most_frequent() {
                print_result("Most frequent", format!("{bits} ({count} shots)"));
            }
            if let Some(time_ms) = result.execution_time_ms {
                print_result("Execution time", format!("{} ms", style(time_ms).yellow()));
            }
        }
        ReportFormat::Json => {
            let report = SearchReport {
                marked_states: states,
                num_qubits: search.num_qubits,
                optimal_iterations: search.optimal_iterations,
                iterations: rounds,
                backend: &config.backend,
                shots: result.shots,
                seed: config.seed,
                summary: search.circuit.summary(),
                theoretical_success: theoretical,
                observed_success: observed,
                counts: &result.counts,
                distribution: &distribution,
                qasm,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
