//! Grover Circuit Intermediate Representation
//!
//! This crate provides the data structures the Grover search pipeline lowers
//! its transforms onto, and that backends and emitters consume.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing quantum
//!   and classical registers
//! - **Gates**: [`StandardGate`], including the multi-controlled Z used by
//!   oracles and diffusion steps
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder with composition, depth and gate counts
//!
//! # Bit ordering
//!
//! Qubit `0` is the least-significant bit of a basis-state index. A bitstring
//! is written with the highest-index bit first, so `|011⟩` has qubits 0 and 1
//! set and qubit 2 clear.
//!
//! # Example: marking `|11⟩`
//!
//! ```rust
//! use grover_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("mark_11", 2, 2);
//!
//! circuit.h_all().unwrap();
//! circuit.cz(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Z` | 1 | Pauli gates |
//! | `CZ` | 2 | Controlled-Z |
//! | `MCZ(k)` | k+1 | Z with `k` controls, phase flip on the all-ones state |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
