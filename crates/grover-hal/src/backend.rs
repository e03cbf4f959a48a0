//! Where circuits run.
//!
//! A search circuit reaches counts in four steps: the backend checks it,
//! accepts it as a job, reports progress, and finally hands back the
//! histogram. Only `wait` has a default; everything else is backend-specific.
//!
//! ```text
//!   validate ─→ submit ─→ status (poll) ─→ result
//! ```

use std::time::Duration;

use async_trait::async_trait;
use grover_ir::Circuit;
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Delay between status polls in [`Backend::wait`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polls before [`Backend::wait`] times out (five minutes at the default interval).
pub const MAX_POLLS: u32 = 600;

/// Execution context handed to a backend at construction.
///
/// Backend-specific settings (`seed`, `max_qubits`, ...) live in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer setting.
    ///
    /// Absent keys give `Ok(None)`; present keys of the wrong type are a
    /// configuration error.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }
}

/// A place to sample circuits.
///
/// `capabilities` is cached by implementations and never fails. A freshly
/// submitted job is `Queued` or later.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    fn capabilities(&self) -> &Capabilities;

    /// Whether jobs are accepted right now.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Every reason `circuit` cannot run here, without submitting it.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Queue `circuit` for `shots` samples.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Counts of a `Completed` job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Stop a job. Finished jobs keep their status.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Poll `status` every [`POLL_INTERVAL`] until the job finishes, giving
    /// up with [`HalError::Timeout`] after [`MAX_POLLS`] polls.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        for _ in 0..MAX_POLLS {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

/// Backend availability information.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Number of jobs currently in queue (if known).
    pub queue_depth: Option<u32>,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Availability of a local backend: always up, nothing queued.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    /// Create availability for an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be submitted as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit can be submitted as-is.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Build from a list of problems; no problems means valid.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            Self::Valid
        } else {
            Self::Invalid { reasons }
        }
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("simulator")
            .with_extra("seed", serde_json::json!(7))
            .with_extra("label", serde_json::json!("x"));

        assert_eq!(config.name, "simulator");
        assert_eq!(config.extra_u64("seed").unwrap(), Some(7));
        assert_eq!(config.extra_u64("max_qubits").unwrap(), None);
        assert!(matches!(
            config.extra_u64("label"),
            Err(HalError::Configuration(_))
        ));
    }

    #[test]
    fn test_backend_config_flattens_extra() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"name":"simulator","max_qubits":12}"#).unwrap();
        assert_eq!(config.extra_u64("max_qubits").unwrap(), Some(12));
    }

    #[test]
    fn test_backend_availability() {
        let up = BackendAvailability::always_available();
        assert!(up.is_available);
        assert_eq!(up.queue_depth, Some(0));

        let down = BackendAvailability::unavailable("maintenance");
        assert!(!down.is_available);
        assert_eq!(down.status_message, Some("maintenance".to_string()));
    }

    #[test]
    fn test_validation_result() {
        assert!(ValidationResult::Valid.is_valid());
        assert!(ValidationResult::from_reasons(vec![]).is_valid());
        assert!(!ValidationResult::from_reasons(vec!["too wide".into()]).is_valid());
    }
}
