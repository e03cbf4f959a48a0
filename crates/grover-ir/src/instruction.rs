//! Circuit instructions: a gate, measurement or barrier plus its operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// What an [`Instruction`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Unitary gate on `qubits`.
    Gate(StandardGate),
    /// Measure `qubits[i]` into `clbits[i]` for every `i`.
    Measure,
    /// Scheduling fence; no effect on the state.
    Barrier,
}

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// What the instruction does.
    pub kind: InstructionKind,
    /// Quantum operands. For controlled gates the controls come first.
    pub qubits: Vec<QubitId>,
    /// Classical operands, paired with `qubits` for measurements.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// A gate on explicit operands.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// A single-qubit gate.
    pub fn single(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// A Z gate on `target` controlled by every qubit in `controls`, using
    /// `z`, `cz` or `mcz` as the control count requires.
    pub fn controlled_z(controls: &[QubitId], target: QubitId) -> Self {
        let gate = StandardGate::controlled_z(controls.len() as u32);
        Self::gate(gate, controls.iter().copied().chain(std::iter::once(target)))
    }

    /// Measure one qubit.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Measure several qubits at once, `qubits[i]` into `clbits[i]`.
    pub fn measure_many(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let clbits: Vec<_> = clbits.into_iter().collect();
        if qubits.len() != clbits.len() {
            return Err(IrError::InvalidInstruction(format!(
                "measurement pairs {} qubits with {} clbits",
                qubits.len(),
                clbits.len(),
            )));
        }
        Ok(Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        })
    }

    /// A barrier across `qubits`.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// The gate, if this is a gate instruction.
    pub fn gate_kind(&self) -> Option<StandardGate> {
        match self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// `(qubit, clbit)` pairs read out by a measurement; empty otherwise.
    pub fn measured_pairs(&self) -> impl Iterator<Item = (QubitId, ClbitId)> + '_ {
        let qubits = if self.is_measure() { &self.qubits[..] } else { &[] };
        qubits.iter().copied().zip(self.clbits.iter().copied())
    }

    /// IR name: the gate name, `"measure"` or `"barrier"`.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }
}
