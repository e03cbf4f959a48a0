//! Statevector simulation engine.
//!
//! Basis index bit `q` holds the value of qubit `q`.

use num_complex::Complex64;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use grover_ir::{Instruction, InstructionKind, StandardGate};

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply an instruction. Measurements and barriers leave the state alone;
    /// measurement is read out by sampling the final state.
    pub fn apply(&mut self, instruction: &Instruction) {
        let InstructionKind::Gate(gate) = &instruction.kind else {
            return;
        };
        let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
        match gate {
            StandardGate::I => {}
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::X => self.apply_x(qubits[0]),
            // Z, CZ and MCZ all negate the states where every operand is 1.
            StandardGate::Z | StandardGate::CZ | StandardGate::MCZ(_) => {
                let mask = qubits.iter().fold(0usize, |m, &q| m | (1 << q));
                self.apply_phase_flip(mask);
            }
        }
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    // =========================================================================
    // Gate kernels
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    /// Negate every amplitude whose index has all bits of `mask` set.
    fn apply_phase_flip(&mut self, mask: usize) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp = -*amp;
            }
        }
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Draw `shots` basis-state outcomes.
    ///
    /// Returns `None` if the state has no probability mass, which only a
    /// numerically broken simulation produces.
    pub fn sample<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> Option<Vec<usize>> {
        let weights = WeightedIndex::new(self.probabilities()).ok()?;
        Some((0..shots).map(|_| weights.sample(rng)).collect())
    }
}
