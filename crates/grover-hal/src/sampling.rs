//! Submit-and-wait helpers on top of [`Backend`].

use grover_ir::Circuit;
use tracing::{debug, instrument};

use crate::backend::{Backend, ValidationResult};
use crate::error::{HalError, HalResult};
use crate::result::{Distribution, ExecutionResult};

/// Validate, submit and wait for `circuit` on `backend`.
#[instrument(skip(backend, circuit), fields(backend = backend.name()))]
pub async fn execute(
    backend: &dyn Backend,
    circuit: &Circuit,
    shots: u32,
) -> HalResult<ExecutionResult> {
    if shots == 0 {
        return Err(HalError::InvalidShots("shot count must be positive".into()));
    }

    let max_qubits = backend.capabilities().num_qubits;
    if circuit.num_qubits() > max_qubits as usize {
        return Err(HalError::CircuitTooLarge(format!(
            "circuit has {} qubits but {} supports at most {max_qubits}",
            circuit.num_qubits(),
            backend.name()
        )));
    }

    if let ValidationResult::Invalid { reasons } = backend.validate(circuit).await? {
        return Err(HalError::InvalidCircuit(reasons.join("; ")));
    }

    let job_id = backend.submit(circuit, shots).await?;
    debug!(job_id = %job_id, "Job submitted");

    let result = backend.wait(&job_id).await?;
    debug!(
        job_id = %job_id,
        distinct = result.counts.len(),
        time_ms = result.execution_time_ms,
        "Job finished"
    );
    Ok(result)
}

/// Execute `circuit` and normalize the counts into a probability
/// distribution over measured bitstrings.
pub async fn sample_distribution(
    backend: &dyn Backend,
    circuit: &Circuit,
    shots: u32,
) -> HalResult<Distribution> {
    let result = execute(backend, circuit, shots).await?;
    Ok(Distribution::from_counts(&result.counts))
}
