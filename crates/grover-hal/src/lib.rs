//! Execution layer for Grover search circuits.
//!
//! A [`Backend`] runs a measured circuit for a number of shots and reports
//! a [`Counts`] histogram. [`sample_distribution`] wraps the whole job
//! lifecycle and returns a normalized [`Distribution`].
//!
//! Backends receive their settings through an explicit [`BackendConfig`];
//! there is no global state.
//!
//! # Example
//!
//! ```ignore
//! use grover_hal::{BackendFactory, BackendConfig, sample_distribution};
//! use grover_adapter_sim::SimulatorBackend;
//! use grover_search::build_grover_search_circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = build_grover_search_circuit(&["011", "100"])?;
//!     let backend = SimulatorBackend::from_config(BackendConfig::new("simulator"))?;
//!
//!     let dist = sample_distribution(&backend, search.circuit.circuit(), 10_000).await?;
//!     println!("P(marked) = {:.3}", dist.mass(&["011", "100"]));
//!     Ok(())
//! }
//! ```
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use grover_hal::{
//!     Backend, BackendAvailability, Capabilities, ValidationResult,
//!     JobId, JobStatus, ExecutionResult, HalResult,
//! };
//! use grover_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn availability(&self) -> HalResult<BackendAvailability> {
//!         Ok(BackendAvailability::always_available())
//!     }
//!
//!     async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
//!         Ok(ValidationResult::Valid)
//!     }
//!
//!     async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
//!         # todo!()
//!     }
//!
//!     async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
//!         # todo!()
//!     }
//!
//!     async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//!
//!     async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod registry;
pub mod result;
pub mod sampling;

pub use backend::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, MAX_POLLS, POLL_INTERVAL,
    ValidationResult,
};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use registry::BackendRegistry;
pub use result::{Counts, Distribution, ExecutionResult};
pub use sampling::{execute, sample_distribution};
