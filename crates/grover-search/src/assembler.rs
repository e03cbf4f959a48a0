//! Assembly of the full, measurable search circuit.

use grover_ir::{Circuit, QubitId};
use serde::Serialize;
use tracing::debug;

use crate::amplification::AmplificationOperator;
use crate::error::{SearchError, SearchResult};
use crate::transform::{BlockRole, Transform};

/// Most gates the amplification block may lower to.
///
/// Bounds `rounds * gates_per_round`, so an explicit iteration count can not
/// request a circuit too large to hold in memory.
pub const MAX_AMPLIFICATION_GATES: u64 = 1 << 21;

/// Structural counts of an assembled search circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircuitSummary {
    /// Hadamards in the initial superposition layer.
    pub superposition_gates: usize,
    /// Oracle applications.
    pub oracle_applications: usize,
    /// Diffusion reflections.
    pub diffusion_applications: usize,
    /// Measured qubits.
    pub measurements: usize,
}

/// The assembled circuit together with the structure it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCircuit {
    circuit: Circuit,
    num_qubits: u32,
    iterations: u64,
    amplification: Transform,
}

impl SearchCircuit {
    /// The gate-level circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Take the gate-level circuit.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    /// Register width.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Grover rounds applied.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// The amplification block between preparation and measurement.
    pub fn amplification(&self) -> &Transform {
        &self.amplification
    }

    /// Count the structural pieces of the circuit.
    pub fn summary(&self) -> CircuitSummary {
        let measurements = self
            .circuit
            .count_ops()
            .get("measure")
            .copied()
            .unwrap_or(0);

        CircuitSummary {
            superposition_gates: self.num_qubits as usize,
            oracle_applications: self.amplification.count_role(BlockRole::Oracle),
            diffusion_applications: self.amplification.count_reflections(),
            measurements,
        }
    }
}

/// Build `H^n`, then `operator^iterations`, then measure every qubit into the
/// classical bit of the same index.
pub fn assemble(
    operator: &AmplificationOperator,
    iterations: i64,
    num_qubits: u32,
) -> SearchResult<SearchCircuit> {
    let Ok(rounds) = u64::try_from(iterations) else {
        return Err(SearchError::InvalidInput(format!(
            "iteration count must be non-negative, got {iterations}"
        )));
    };
    if num_qubits != operator.num_qubits() {
        return Err(SearchError::InvalidInput(format!(
            "register width {num_qubits} does not match the {}-qubit operator",
            operator.num_qubits()
        )));
    }
    let per_round = operator.round().gate_count();
    match rounds.checked_mul(per_round) {
        Some(total) if total <= MAX_AMPLIFICATION_GATES => {}
        _ => {
            return Err(SearchError::InvalidInput(format!(
                "{rounds} rounds of {per_round} gates exceed the limit of \
                 {MAX_AMPLIFICATION_GATES} amplification gates"
            )));
        }
    }
    let repeat = usize::try_from(rounds).map_err(|_| {
        SearchError::InvalidInput(format!("{rounds} rounds exceed the addressable size"))
    })?;

    let amplification = operator.power(repeat);

    let mut circuit = Circuit::with_size("grover", num_qubits, num_qubits);
    for q in 0..num_qubits {
        circuit.h(QubitId(q))?;
    }
    amplification.append_to(&mut circuit)?;
    circuit.measure_all()?;

    debug!(
        num_qubits,
        iterations = rounds,
        depth = circuit.depth(),
        num_ops = circuit.num_ops(),
        "Assembled search circuit"
    );

    Ok(SearchCircuit {
        circuit,
        num_qubits,
        iterations: rounds,
        amplification,
    })
}
