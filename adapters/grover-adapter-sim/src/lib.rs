//! Local statevector simulator for Grover search circuits.
//!
//! Simulates the circuit once, then draws shots from the final state. It
//! also reports the exact outcome distribution, which is what sampling
//! converges to as the shot count grows.
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 25 | ~512 MB |
//!
//! # Example
//!
//! ```ignore
//! use grover_adapter_sim::SimulatorBackend;
//! use grover_hal::sample_distribution;
//! use grover_search::build_grover_search_circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = build_grover_search_circuit(&["011", "100"])?;
//!     let backend = SimulatorBackend::new().with_seed(7);
//!
//!     let dist = sample_distribution(&backend, search.circuit.circuit(), 10_000).await?;
//!     for (bits, p) in dist.sorted() {
//!         println!("{bits}: {p:.3}");
//!     }
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
