//! End-to-end construction of a Grover search circuit.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::amplification::AmplificationOperator;
use crate::assembler::{SearchCircuit, assemble};
use crate::error::{SearchError, SearchResult};
use crate::iterations::optimal_iterations;
use crate::oracle::OracleCircuit;
use crate::problem::SearchProblem;

/// Construction stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStage {
    /// Marked states parsed and validated.
    ProblemDefined,
    /// Phase oracle built.
    OracleBuilt,
    /// Grover round built around the oracle.
    OperatorBuilt,
    /// Number of rounds decided.
    IterationsComputed,
    /// Measurable circuit assembled.
    CircuitAssembled,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProblemDefined => "problem defined",
            Self::OracleBuilt => "oracle built",
            Self::OperatorBuilt => "operator built",
            Self::IterationsComputed => "iterations computed",
            Self::CircuitAssembled => "circuit assembled",
        };
        f.write_str(name)
    }
}

/// Output of [`build_grover_search_circuit`].
#[derive(Debug, Clone, Serialize)]
pub struct GroverSearch {
    /// The assembled, measurable circuit.
    pub circuit: SearchCircuit,
    /// Register width.
    pub num_qubits: u32,
    /// `floor(pi/4 * sqrt(2^n / m))` for this problem.
    pub optimal_iterations: u64,
}

/// Build the Grover search circuit for `marked_states` with the optimal
/// number of rounds.
///
/// ```
/// use grover_search::build_grover_search_circuit;
///
/// let search = build_grover_search_circuit(&["011", "100"]).unwrap();
/// assert_eq!(search.num_qubits, 3);
/// assert_eq!(search.optimal_iterations, 1);
///
/// let summary = search.circuit.summary();
/// assert_eq!(summary.superposition_gates, 3);
/// assert_eq!(summary.oracle_applications, 1);
/// assert_eq!(summary.diffusion_applications, 1);
/// assert_eq!(summary.measurements, 3);
/// ```
pub fn build_grover_search_circuit<S: AsRef<str>>(marked_states: &[S]) -> SearchResult<GroverSearch> {
    build_with_iterations(marked_states, None)
}

/// Like [`build_grover_search_circuit`], but apply `iterations` rounds
/// instead of the optimal count when given.
pub fn build_with_iterations<S: AsRef<str>>(
    marked_states: &[S],
    iterations: Option<i64>,
) -> SearchResult<GroverSearch> {
    let problem = SearchProblem::new(marked_states)?;
    let num_qubits = problem.num_qubits();
    debug!(
        stage = %PipelineStage::ProblemDefined,
        num_qubits,
        num_marked = problem.num_marked(),
        "Pipeline stage"
    );

    let oracle = OracleCircuit::build(&problem);
    debug!(stage = %PipelineStage::OracleBuilt, "Pipeline stage");

    let operator = AmplificationOperator::new(oracle)?;
    debug!(stage = %PipelineStage::OperatorBuilt, "Pipeline stage");

    let optimal = optimal_iterations(num_qubits, problem.num_marked() as u64)?;
    let rounds = match iterations {
        Some(k) => k,
        None => i64::try_from(optimal).map_err(|_| {
            SearchError::InvalidInput(format!("{optimal} rounds exceed the supported range"))
        })?,
    };
    debug!(
        stage = %PipelineStage::IterationsComputed,
        optimal,
        rounds,
        "Pipeline stage"
    );

    let circuit = assemble(&operator, rounds, num_qubits)?;
    debug!(stage = %PipelineStage::CircuitAssembled, "Pipeline stage");

    info!(
        num_qubits,
        num_marked = problem.num_marked(),
        iterations = circuit.iterations(),
        "Grover search circuit ready"
    );

    Ok(GroverSearch {
        circuit,
        num_qubits,
        optimal_iterations: optimal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_iterations() {
        let search = build_with_iterations(&["011", "100"], Some(3)).unwrap();
        assert_eq!(search.optimal_iterations, 1);
        assert_eq!(search.circuit.iterations(), 3);
        assert_eq!(search.circuit.summary().oracle_applications, 3);
    }

    #[test]
    fn test_negative_override_rejected() {
        assert!(matches!(
            build_with_iterations(&["01"], Some(-2)),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_huge_override_rejected() {
        assert!(matches!(
            build_with_iterations(&["01"], Some(i64::MAX)),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_states_rejected_before_assembly() {
        assert!(matches!(
            build_grover_search_circuit(&["01", "101"]),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(PipelineStage::OracleBuilt.to_string(), "oracle built");
        assert_eq!(PipelineStage::CircuitAssembled.to_string(), "circuit assembled");
    }
}
