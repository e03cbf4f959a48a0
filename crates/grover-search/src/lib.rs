//! Grover search construction.
//!
//! Turns a list of marked bit-strings into a measurable circuit that
//! amplifies their amplitudes:
//!
//! 1. [`OracleCircuit`]: a phase oracle flipping the sign of each marked state.
//! 2. [`AmplificationOperator`]: oracle followed by the diffusion reflection.
//! 3. [`optimal_iterations`]: `floor(pi/4 * sqrt(2^n / m))` rounds.
//! 4. [`assemble`]: Hadamard layer, the rounds, measurement of every qubit.
//!
//! [`build_grover_search_circuit`] runs the whole pipeline.
//!
//! # Example
//!
//! ```rust
//! use grover_search::build_grover_search_circuit;
//!
//! let search = build_grover_search_circuit(&["011", "100"]).unwrap();
//! let circuit = search.circuit.circuit();
//! assert_eq!(circuit.num_qubits(), 3);
//! assert!(circuit.has_measurements());
//! ```
//!
//! # Bit ordering
//!
//! Marked states are read most-significant qubit first. The last character
//! of `"011"` is qubit 0, so the string names basis index 3.

pub mod amplification;
pub mod assembler;
pub mod error;
pub mod iterations;
pub mod oracle;
pub mod pipeline;
pub mod problem;
pub mod transform;

pub use amplification::AmplificationOperator;
pub use assembler::{CircuitSummary, MAX_AMPLIFICATION_GATES, SearchCircuit, assemble};
pub use error::{SearchError, SearchResult};
pub use iterations::{optimal_iterations, success_probability};
pub use oracle::OracleCircuit;
pub use pipeline::{GroverSearch, PipelineStage, build_grover_search_circuit, build_with_iterations};
pub use problem::{MAX_QUBITS, MarkedState, SearchProblem};
pub use transform::{BlockRole, Transform};
