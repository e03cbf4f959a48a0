//! `OpenQASM` 3 emitter for Grover circuits.
//!
//! | IR gate | Emitted as |
//! |---------|------------|
//! | `id`, `h`, `x`, `z`, `cz` | same name from `stdgates.inc` |
//! | `mcz` with `k` controls | `ctrl(k) @ z` |
//! | measure | `c[i] = measure q[j];` per pair |
//! | barrier | `barrier q[..];` |
//!
//! # Example
//!
//! ```rust
//! use grover_ir::{Circuit, QubitId};
//! use grover_qasm3::emit;
//!
//! let mut circuit = Circuit::with_size("mcz", 3, 0);
//! circuit.mcz(&[QubitId(0), QubitId(1)], QubitId(2)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let qasm = emit(&circuit);
//! assert!(qasm.starts_with("OPENQASM 3.0;"));
//! assert!(qasm.contains("ctrl(2) @ z q[0], q[1], q[2];"));
//! assert!(qasm.contains("c[2] = measure q[2];"));
//! ```

mod emitter;

pub use emitter::{emit, emit_with_comments};
