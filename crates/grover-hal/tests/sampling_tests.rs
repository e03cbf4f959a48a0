//! Tests for the submit/wait/normalize helpers against scripted backends.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use grover_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult,
    JobId, JobStatus, ValidationResult, execute, sample_distribution,
};
use grover_ir::Circuit;

/// Backend that reports `Running` for a number of polls, then a fixed outcome.
struct ScriptedBackend {
    capabilities: Capabilities,
    polls_before_done: u32,
    polls: AtomicU32,
    outcome: JobStatus,
    reject: Option<String>,
}

impl ScriptedBackend {
    fn new(polls_before_done: u32, outcome: JobStatus) -> Self {
        Self {
            capabilities: Capabilities::simulator(4),
            polls_before_done,
            polls: AtomicU32::new(0),
            outcome,
            reject: None,
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(match &self.reject {
            Some(reason) => ValidationResult::Invalid {
                reasons: vec![reason.clone()],
            },
            None => ValidationResult::Valid,
        })
    }

    async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
        Ok(JobId::new("job-1"))
    }

    async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
        let seen = self.polls.fetch_add(1, Ordering::SeqCst);
        if seen < self.polls_before_done {
            Ok(JobStatus::Running)
        } else {
            Ok(self.outcome.clone())
        }
    }

    async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
        let mut counts = Counts::new();
        counts.insert("11", 3);
        counts.insert("00", 1);
        Ok(ExecutionResult::new(counts, 4))
    }

    async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
        Ok(())
    }
}

fn measured_circuit() -> Circuit {
    let mut circuit = Circuit::with_size("c", 2, 0);
    circuit.measure_all().unwrap();
    circuit
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn waits_for_completion_and_normalizes() {
    let backend = ScriptedBackend::new(3, JobStatus::Completed);
    let dist = sample_distribution(&backend, &measured_circuit(), 4)
        .await
        .unwrap();

    assert!((dist.probability("11") - 0.75).abs() < 1e-12);
    assert!((dist.probability("00") - 0.25).abs() < 1e-12);
    let total: f64 = dist.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert_eq!(backend.polls.load(Ordering::SeqCst), 4);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_shots_are_rejected_before_submission() {
    let backend = ScriptedBackend::new(0, JobStatus::Completed);
    let err = execute(&backend, &measured_circuit(), 0).await.unwrap_err();
    assert!(matches!(err, HalError::InvalidShots(_)));
    assert_eq!(backend.polls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_circuits_are_reported() {
    let mut backend = ScriptedBackend::new(0, JobStatus::Completed);
    backend.reject = Some("gate 'ccx' is not supported".into());
    let err = execute(&backend, &measured_circuit(), 10).await.unwrap_err();
    assert!(matches!(err, HalError::InvalidCircuit(msg) if msg.contains("ccx")));
}

#[tokio::test]
async fn circuits_wider_than_the_backend_are_too_large() {
    let backend = ScriptedBackend::new(0, JobStatus::Completed);
    let mut wide = Circuit::with_size("wide", 5, 0);
    wide.measure_all().unwrap();

    let err = sample_distribution(&backend, &wide, 10).await.unwrap_err();
    assert!(matches!(err, HalError::CircuitTooLarge(_)));
    assert_eq!(backend.polls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_jobs_surface_their_reason() {
    let backend = ScriptedBackend::new(1, JobStatus::Failed("boom".into()));
    let err = execute(&backend, &measured_circuit(), 10).await.unwrap_err();
    assert!(matches!(err, HalError::JobFailed(msg) if msg == "boom"));
}

#[tokio::test]
async fn cancelled_jobs_are_reported() {
    let backend = ScriptedBackend::new(0, JobStatus::Cancelled);
    let err = execute(&backend, &measured_circuit(), 10).await.unwrap_err();
    assert!(matches!(err, HalError::JobCancelled));
}

#[tokio::test(start_paused = true)]
async fn never_finishing_jobs_time_out() {
    let backend = ScriptedBackend::new(u32::MAX, JobStatus::Completed);
    let err = execute(&backend, &measured_circuit(), 10).await.unwrap_err();
    assert!(matches!(err, HalError::Timeout(id) if id == "job-1"));
}
