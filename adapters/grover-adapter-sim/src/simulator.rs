//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use grover_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    Distribution, ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use grover_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

/// Default register limit, about 16 MB of amplitudes.
const DEFAULT_MAX_QUBITS: u32 = 20;
/// Hard register limit accepted from configuration.
const MAX_CONFIGURABLE_QUBITS: u32 = 30;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local statevector simulator.
///
/// The circuit is simulated once and measurement outcomes are drawn from the
/// final state, so measurements must be the last operation on every measured
/// qubit. A job is dropped once its result has been fetched.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a simulator with default settings and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(DEFAULT_MAX_QUBITS),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            rng: Mutex::new(StdRng::from_entropy()),
            seed: None,
        }
    }

    /// Seed the sampler so repeated runs draw the same shots.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self.seed = Some(seed);
        self
    }

    /// Limit the register width accepted by this simulator.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.capabilities = Capabilities::simulator(max_qubits);
        self
    }

    /// The sampler seed, if one was set.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Probabilities of every measured bitstring in the limit of infinitely
    /// many shots.
    #[instrument(skip(self, circuit))]
    pub fn exact_distribution(&self, circuit: &Circuit) -> HalResult<Distribution> {
        self.check_submittable(circuit)?;

        let readout = Readout::from_circuit(circuit);
        let state = simulate(circuit);

        let mut merged: FxHashMap<String, f64> = FxHashMap::default();
        for (index, p) in state.probabilities().into_iter().enumerate() {
            if p > 0.0 {
                *merged.entry(readout.bitstring(index)).or_insert(0.0) += p;
            }
        }
        Ok(Distribution::from_probabilities(merged))
    }

    /// Problems that keep `circuit` from running here.
    fn problems(&self, circuit: &Circuit) -> Vec<String> {
        let mut reasons = Vec::new();

        let max_qubits = self.capabilities.num_qubits;
        if circuit.num_qubits() > max_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but the simulator supports at most {max_qubits}",
                circuit.num_qubits()
            ));
        }
        if !circuit.has_measurements() {
            reasons.push("circuit has no measurements".into());
        }
        for gate in self.capabilities.gate_set.unsupported_in(circuit) {
            reasons.push(format!("gate '{gate}' is not supported"));
        }
        if let Some(qubit) = gate_after_measurement(circuit) {
            reasons.push(format!("qubit {qubit} is used after being measured"));
        }
        reasons
    }

    /// Map validation problems onto the matching error.
    fn check_submittable(&self, circuit: &Circuit) -> HalResult<()> {
        let max_qubits = self.capabilities.num_qubits;
        if circuit.num_qubits() > max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but the simulator supports at most {max_qubits}",
                circuit.num_qubits()
            )));
        }
        let reasons = self.problems(circuit);
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(HalError::InvalidCircuit(reasons.join("; ")))
        }
    }

    /// Run the simulation and draw `shots` outcomes.
    #[instrument(skip(self, circuit))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        debug!(
            num_qubits = circuit.num_qubits(),
            shots,
            instructions = circuit.instructions().len(),
            "Starting simulation"
        );

        let state = simulate(circuit);
        let readout = Readout::from_circuit(circuit);

        let outcomes = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            state.sample(shots, &mut *rng)
        }
        .ok_or_else(|| HalError::Backend("final state has no probability mass".into()))?;

        let mut counts = Counts::new();
        for outcome in outcomes {
            counts.insert(readout.bitstring(outcome), 1);
        }

        let elapsed = start.elapsed();
        debug!(?elapsed, distinct = counts.len(), "Simulation completed");

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }

    fn with_job<T>(&self, job_id: &JobId, f: impl FnOnce(&mut SimJob) -> T) -> HalResult<T> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get_mut(&job_id.0)
            .map(f)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply every gate of `circuit` to a fresh register.
fn simulate(circuit: &Circuit) -> Statevector {
    let mut state = Statevector::new(circuit.num_qubits());
    for inst in circuit.instructions() {
        state.apply(inst);
    }
    state
}

/// First qubit touched by a gate after it was measured.
fn gate_after_measurement(circuit: &Circuit) -> Option<grover_ir::QubitId> {
    let mut measured = vec![false; circuit.num_qubits()];
    for inst in circuit.instructions() {
        match inst.kind {
            InstructionKind::Measure => {
                for q in &inst.qubits {
                    measured[q.0 as usize] = true;
                }
            }
            InstructionKind::Gate(_) => {
                if let Some(q) = inst.qubits.iter().find(|q| measured[q.0 as usize]) {
                    return Some(*q);
                }
            }
            InstructionKind::Barrier => {}
        }
    }
    None
}

/// Which qubit each classical bit reads.
struct Readout {
    sources: Vec<Option<u32>>,
}

impl Readout {
    fn from_circuit(circuit: &Circuit) -> Self {
        let mut sources = vec![None; circuit.num_clbits()];
        for (q, c) in circuit.instructions().iter().flat_map(|i| i.measured_pairs()) {
            sources[c.0 as usize] = Some(q.0);
        }
        Self { sources }
    }

    /// Classical register for basis outcome `index`, highest clbit first.
    fn bitstring(&self, index: usize) -> String {
        self.sources
            .iter()
            .rev()
            .map(|src| match src {
                Some(q) if index & (1 << q) != 0 => '1',
                _ => '0',
            })
            .collect()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::from_reasons(self.problems(circuit)))
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shot count must be positive".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots exceed the limit of {}",
                self.capabilities.max_shots
            )));
        }
        self.check_submittable(circuit)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            jobs.insert(
                job_id.0.clone(),
                SimJob {
                    job: Job::new(job_id.clone(), shots, self.name()),
                    result: None,
                },
            );
        }
        debug!(job_id = %job_id, "Submitted job");

        let outcome = self.run_simulation(circuit, shots);
        self.with_job(&job_id, |sim_job| match outcome {
            Ok(result) => {
                sim_job.result = Some(result);
                sim_job.job.transition(JobStatus::Completed);
            }
            Err(e) => sim_job.job.transition(JobStatus::Failed(e.to_string())),
        })?;

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.with_job(job_id, |sim_job| sim_job.job.status.clone())
    }

    /// Hand out the result and forget the job; a second call reports
    /// [`HalError::JobNotFound`].
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        let result = sim_job
            .result
            .take()
            .ok_or_else(|| HalError::JobFailed(format!("job {job_id} has no result")))?;
        jobs.remove(&job_id.0);
        debug!(job_id = %job_id, retained = jobs.len(), "Released job");
        Ok(result)
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.with_job(job_id, |sim_job| sim_job.job.transition(JobStatus::Cancelled))
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            None => DEFAULT_MAX_QUBITS,
            Some(n) if (1..=u64::from(MAX_CONFIGURABLE_QUBITS)).contains(&n) => n as u32,
            Some(n) => {
                return Err(HalError::Configuration(format!(
                    "max_qubits must be between 1 and {MAX_CONFIGURABLE_QUBITS}, got {n}"
                )));
            }
        };
        let seed = config.extra_u64("seed")?;

        let mut backend = Self::new().with_max_qubits(max_qubits);
        if let Some(seed) = seed {
            backend = backend.with_seed(seed);
        }
        backend.config = config;
        Ok(backend)
    }
}
