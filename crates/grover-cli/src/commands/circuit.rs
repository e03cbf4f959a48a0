//! Circuit command implementation.

use anyhow::Result;
use serde::Serialize;

use grover_ir::Circuit;
use grover_qasm3::emit_with_comments;
use grover_search::{CircuitSummary, build_with_iterations};

use super::common::{print_header, print_result, print_search_overview, print_section, qasm_comments};
use crate::CircuitFormat;

/// Machine-readable circuit description.
#[derive(Debug, Serialize)]
struct CircuitReport<'a> {
    marked_states: &'a [String],
    num_qubits: u32,
    optimal_iterations: u64,
    iterations: u64,
    depth: usize,
    summary: CircuitSummary,
    circuit: &'a Circuit,
}

/// Execute the circuit command.
pub fn execute(states: &[String], iterations: Option<i64>, format: CircuitFormat) -> Result<()> {
    let search = build_with_iterations(states, iterations)?;
    let circuit = search.circuit.circuit();

    match format {
        CircuitFormat::Summary => {
            print_header("Grover Search Circuit");
            print_search_overview(states, &search);

            print_section("Gate Counts");
            let mut counts: Vec<_> = circuit.count_ops().into_iter().collect();
            counts.sort_unstable();
            for (name, count) in counts {
                print_result(name, count);
            }
        }
        CircuitFormat::Qasm => {
            print!("{}", emit_with_comments(circuit, &qasm_comments(states, &search)));
        }
        CircuitFormat::Json => {
            let report = CircuitReport {
                marked_states: states,
                num_qubits: search.num_qubits,
                optimal_iterations: search.optimal_iterations,
                iterations: search.circuit.iterations(),
                depth: circuit.depth(),
                summary: search.circuit.summary(),
                circuit,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
