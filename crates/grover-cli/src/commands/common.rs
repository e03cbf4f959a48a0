//! Shared helpers for CLI commands.

use std::fmt::Display;
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use grover_adapter_sim::SimulatorBackend;
use grover_hal::{BackendRegistry, Counts};
use grover_search::{GroverSearch, success_probability};

/// Outcomes shown before the table is truncated.
const MAX_ROWS: usize = 16;

/// Every backend this binary can run on.
pub fn backend_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register::<SimulatorBackend>("simulator");
    registry
}

/// Print a command header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
}

/// Print a section title.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a labelled value.
pub fn print_result(label: &str, value: impl Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Spinner shown while a job runs.
pub fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Print the problem and circuit sections shared by `search` and `circuit`.
pub fn print_search_overview(states: &[String], search: &GroverSearch) {
    let n = search.num_qubits;
    let rounds = search.circuit.iterations();
    let circuit = search.circuit.circuit();
    let summary = search.circuit.summary();

    print_section("Problem Setup");
    print_result("Qubits", n);
    print_result("Search space size", 1u64 << n);
    print_result("Marked states", states.join(", "));

    print_section("Circuit");
    print_result("Optimal iterations", search.optimal_iterations);
    if rounds != search.optimal_iterations {
        print_result("Iterations used", style(rounds).yellow());
    }
    print_result("Superposition gates", summary.superposition_gates);
    print_result("Oracle applications", summary.oracle_applications);
    print_result("Diffusion applications", summary.diffusion_applications);
    print_result("Measurements", summary.measurements);
    print_result("Depth", circuit.depth());
    print_result("Operations", circuit.num_ops());
    print_result(
        "Theoretical success",
        format!(
            "{:.2}%",
            success_probability(n, states.len() as u64, rounds) * 100.0
        ),
    );
}

/// Comment lines placed at the top of emitted QASM.
pub fn qasm_comments(states: &[String], search: &GroverSearch) -> Vec<String> {
    vec![
        format!("Grover search for {}", states.join(", ")),
        format!(
            "iterations: {} (optimal {})",
            search.circuit.iterations(),
            search.optimal_iterations
        ),
    ]
}

/// Print a measurement histogram with marked states starred.
pub fn print_counts(counts: &Counts, marked: &[String]) {
    let sorted = counts.sorted();
    let total = counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);
        let star = if marked.iter().any(|m| m == bitstring) {
            style("★").yellow().bold()
        } else {
            style(" ")
        };

        println!(
            "  {} {}: {:>6} ({:>5.2}%) {}",
            star,
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_ROWS {
        println!("    ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }
}
