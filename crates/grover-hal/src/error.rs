//! Errors raised while executing and sampling circuits.

use thiserror::Error;

/// Execution and sampling errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No backend of that name, or the backend is offline.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend reported the job as failed.
    #[error("job failed: {0}")]
    JobFailed(String),

    #[error("job was cancelled before producing counts")]
    JobCancelled,

    #[error("unknown job id: {0}")]
    JobNotFound(String),

    /// The backend refused the circuit; the message lists every reason.
    #[error("circuit rejected: {0}")]
    InvalidCircuit(String),

    /// A `BackendConfig` setting is missing or has the wrong type.
    #[error("invalid backend configuration: {0}")]
    Configuration(String),

    /// Polling gave up before the job reached a terminal state.
    #[error("timed out waiting for job {0}")]
    Timeout(String),

    /// The register is wider than the backend can hold.
    #[error("circuit too large: {0}")]
    CircuitTooLarge(String),

    /// Shot count is zero or above the backend maximum.
    #[error("invalid shot count: {0}")]
    InvalidShots(String),

    /// Any other backend-side failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for execution and sampling.
pub type HalResult<T> = Result<T, HalError>;
