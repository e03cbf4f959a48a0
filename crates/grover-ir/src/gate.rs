//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// The set is the one Grover circuits are lowered to: a Hadamard layer,
/// Pauli-X conjugations for open controls, and Z gates with any number of
/// controls for phase flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Controlled-Z gate.
    CZ,
    /// Z gate with `n` controls.
    ///
    /// Operands are the controls followed by the target. The gate is
    /// symmetric in its operands: it flips the phase of the basis state in
    /// which every operand is `1`.
    MCZ(u32),
}

impl StandardGate {
    /// The Z gate with `num_controls` controls, in its smallest form.
    ///
    /// Zero controls is a plain [`StandardGate::Z`], one control is
    /// [`StandardGate::CZ`].
    pub fn controlled_z(num_controls: u32) -> Self {
        match num_controls {
            0 => StandardGate::Z,
            1 => StandardGate::CZ,
            n => StandardGate::MCZ(n),
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::CZ => "cz",
            StandardGate::MCZ(_) => "mcz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I | StandardGate::H | StandardGate::X | StandardGate::Z => 1,
            StandardGate::CZ => 2,
            StandardGate::MCZ(controls) => controls + 1,
        }
    }

    /// Number of control qubits of a Z-family gate, `None` for the others.
    pub fn z_controls(&self) -> Option<u32> {
        match self {
            StandardGate::Z => Some(0),
            StandardGate::CZ => Some(1),
            StandardGate::MCZ(controls) => Some(*controls),
            _ => None,
        }
    }

    /// Whether the gate is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            StandardGate::I | StandardGate::Z | StandardGate::CZ | StandardGate::MCZ(_)
        )
    }
}
