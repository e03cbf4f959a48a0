//! Phase oracles built from a list of marked states.

use grover_ir::Circuit;
use serde::Serialize;
use tracing::debug;

use crate::error::SearchResult;
use crate::problem::{MarkedState, SearchProblem};
use crate::transform::{BlockRole, Transform};

/// A phase oracle `O|x> = (-1)^f(x) |x>` with `f(x) = 1` on the marked states.
///
/// The oracle is one phase flip per marked state. Since the flips are
/// diagonal and each touches a single basis state, their order does not
/// matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OracleCircuit {
    num_qubits: u32,
    marked: Vec<MarkedState>,
    transform: Transform,
}

impl OracleCircuit {
    /// Build the oracle for a validated problem.
    pub fn build(problem: &SearchProblem) -> Self {
        let marked = problem.marked_states().to_vec();
        let flips = marked.iter().cloned().map(Transform::PhaseFlip).collect();

        debug!(
            num_qubits = problem.num_qubits(),
            num_marked = marked.len(),
            "Built phase oracle"
        );

        Self {
            num_qubits: problem.num_qubits(),
            marked,
            transform: Transform::block(BlockRole::Oracle, flips),
        }
    }

    /// Parse, validate and build in one step.
    ///
    /// ```
    /// use grover_search::OracleCircuit;
    ///
    /// let oracle = OracleCircuit::from_marked_states(&["011", "100"]).unwrap();
    /// assert_eq!(oracle.num_qubits(), 3);
    /// assert!(oracle.flips_phase(3));
    /// assert!(!oracle.flips_phase(0));
    /// ```
    pub fn from_marked_states<S: AsRef<str>>(states: &[S]) -> SearchResult<Self> {
        Ok(Self::build(&SearchProblem::new(states)?))
    }

    /// An oracle that marks nothing on `num_qubits` registers.
    pub fn identity(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            marked: Vec::new(),
            transform: Transform::block(BlockRole::Oracle, Vec::new()),
        }
    }

    /// Register width.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Marked states in the order they were given.
    pub fn marked_states(&self) -> &[MarkedState] {
        &self.marked
    }

    /// Number of marked states.
    pub fn num_marked(&self) -> usize {
        self.marked.len()
    }

    /// The oracle as a transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// `f(index)`: whether the oracle negates the amplitude of `index`.
    pub fn flips_phase(&self, index: u64) -> bool {
        self.phase(index) < 0
    }

    /// The sign, `-1` or `+1`, the oracle puts on basis state `index`.
    pub fn phase(&self, index: u64) -> i8 {
        // An oracle is a block of phase flips only, so it is always diagonal.
        self.transform.diagonal_sign(index).unwrap_or(1)
    }

    /// Lower the oracle to a gate-level circuit without measurements.
    pub fn to_circuit(&self) -> SearchResult<Circuit> {
        let mut circuit = Circuit::with_size("oracle", self.num_qubits, 0);
        self.transform.append_to(&mut circuit)?;
        Ok(circuit)
    }
}
