//! Symbolic unitary transforms over a qubit register.
//!
//! Oracles, Grover rounds and their powers are kept as a small tree of
//! immutable values. The tree is only turned into gates when it is lowered
//! onto a [`Circuit`], so structure (how many oracle calls, how many
//! reflections) stays inspectable after construction.

use grover_ir::{Circuit, IrResult, QubitId};
use serde::Serialize;

use crate::problem::MarkedState;

/// What a [`Transform::Composite`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    /// Plain sequencing with no further meaning.
    Sequence,
    /// A phase oracle: the product of its phase flips.
    Oracle,
    /// One Grover round: oracle followed by the diffusion reflection.
    GroverIteration,
}

/// A unitary transform, applied left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Negate the amplitude of exactly one basis state.
    PhaseFlip(MarkedState),
    /// Diffusion: reflection about the uniform superposition on `num_qubits`.
    Reflection {
        /// Register width.
        num_qubits: u32,
    },
    /// Ordered sequence of parts, tagged with what it stands for.
    Composite {
        /// Meaning of the block.
        role: BlockRole,
        /// Parts in application order.
        parts: Vec<Transform>,
    },
}

impl Transform {
    /// Tag `parts` with `role`.
    pub fn block(role: BlockRole, parts: Vec<Transform>) -> Self {
        Self::Composite { role, parts }
    }

    /// Apply `self`, then `next`.
    #[must_use]
    pub fn compose(self, next: Transform) -> Self {
        match self {
            Self::Composite {
                role: BlockRole::Sequence,
                mut parts,
            } => {
                parts.push(next);
                Self::block(BlockRole::Sequence, parts)
            }
            first => Self::block(BlockRole::Sequence, vec![first, next]),
        }
    }

    /// Apply `self` `times` times in a row. Zero repetitions is the identity.
    ///
    /// Allocates one clone per repetition; callers bound `times` first.
    pub fn repeat(&self, times: usize) -> Self {
        Self::block(BlockRole::Sequence, vec![self.clone(); times])
    }

    /// Smallest register the transform acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            Self::PhaseFlip(state) => state.num_qubits(),
            Self::Reflection { num_qubits } => *num_qubits,
            Self::Composite { parts, .. } => {
                parts.iter().map(Self::num_qubits).max().unwrap_or(0)
            }
        }
    }

    /// Whether the transform does nothing structurally (only empty blocks).
    pub fn is_identity(&self) -> bool {
        match self {
            Self::Composite { parts, .. } => parts.iter().all(Self::is_identity),
            _ => false,
        }
    }

    /// Number of composites tagged `role`, counted through nesting.
    pub fn count_role(&self, role: BlockRole) -> usize {
        match self {
            Self::Composite { role: r, parts } => {
                let inner: usize = parts.iter().map(|p| p.count_role(role)).sum();
                inner + usize::from(*r == role)
            }
            _ => 0,
        }
    }

    /// Number of diffusion reflections.
    pub fn count_reflections(&self) -> usize {
        match self {
            Self::Reflection { .. } => 1,
            Self::Composite { parts, .. } => parts.iter().map(Self::count_reflections).sum(),
            Self::PhaseFlip(_) => 0,
        }
    }

    /// Number of gates [`append_to`](Self::append_to) emits.
    pub fn gate_count(&self) -> u64 {
        match self {
            Self::PhaseFlip(state) => 2 * state.zero_qubits().len() as u64 + 1,
            Self::Reflection { num_qubits: 0 } => 0,
            Self::Reflection { num_qubits } => 4 * u64::from(*num_qubits) + 1,
            Self::Composite { parts, .. } => parts.iter().map(Self::gate_count).sum(),
        }
    }

    /// Sign the transform puts on basis state `index`, if it is diagonal.
    ///
    /// Returns `None` when the transform contains a reflection, which mixes
    /// basis states.
    pub fn diagonal_sign(&self, index: u64) -> Option<i8> {
        match self {
            Self::PhaseFlip(state) => Some(if state.index() == index { -1 } else { 1 }),
            Self::Reflection { .. } => None,
            Self::Composite { parts, .. } => parts
                .iter()
                .try_fold(1i8, |acc, p| p.diagonal_sign(index).map(|s| acc * s)),
        }
    }

    /// Lower the transform onto `circuit`, acting on its lowest qubits.
    pub fn append_to(&self, circuit: &mut Circuit) -> IrResult<()> {
        match self {
            Self::PhaseFlip(state) => append_phase_flip(circuit, state),
            Self::Reflection { num_qubits } => append_reflection(circuit, *num_qubits),
            Self::Composite { parts, .. } => {
                for part in parts {
                    part.append_to(circuit)?;
                }
                Ok(())
            }
        }
    }
}

/// X on the open controls, a Z with every other qubit as control, X again.
fn append_phase_flip(circuit: &mut Circuit, state: &MarkedState) -> IrResult<()> {
    let n = state.num_qubits();
    let open = state.zero_qubits();
    let controls: Vec<QubitId> = (0..n - 1).map(QubitId).collect();

    for &q in &open {
        circuit.x(q)?;
    }
    circuit.mcz(&controls, QubitId(n - 1))?;
    for &q in &open {
        circuit.x(q)?;
    }
    Ok(())
}

/// H, X, multi-controlled Z, X, H. Equal to `2|s><s| - I` up to global phase.
fn append_reflection(circuit: &mut Circuit, n: u32) -> IrResult<()> {
    if n == 0 {
        return Ok(());
    }
    let register: Vec<QubitId> = (0..n).map(QubitId).collect();
    for &q in &register {
        circuit.h(q)?;
    }
    for &q in &register {
        circuit.x(q)?;
    }
    circuit.mcz(&register[..register.len() - 1], QubitId(n - 1))?;
    for &q in &register {
        circuit.x(q)?;
    }
    for &q in &register {
        circuit.h(q)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip(bits: &str) -> Transform {
        Transform::PhaseFlip(MarkedState::parse(bits).unwrap())
    }

    #[test]
    fn test_empty_block_is_identity() {
        let id = Transform::block(BlockRole::Sequence, Vec::new());
        assert!(id.is_identity());
        assert_eq!(id.gate_count(), 0);
        assert_eq!(id.num_qubits(), 0);
        assert_eq!(id.diagonal_sign(5), Some(1));

        let mut circuit = Circuit::with_size("id", 2, 0);
        id.append_to(&mut circuit).unwrap();
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn test_repeat_zero_is_identity() {
        let round = Transform::block(
            BlockRole::GroverIteration,
            vec![flip("10"), Transform::Reflection { num_qubits: 2 }],
        );
        let none = round.repeat(0);
        assert!(none.is_identity());
        assert_eq!(none.count_role(BlockRole::GroverIteration), 0);

        let three = round.repeat(3);
        assert_eq!(three.count_role(BlockRole::GroverIteration), 3);
        assert_eq!(three.count_reflections(), 3);
    }

    #[test]
    fn test_compose_flattens_sequences() {
        let t = flip("01").compose(flip("10")).compose(flip("11"));
        match &t {
            Transform::Composite { role, parts } => {
                assert_eq!(*role, BlockRole::Sequence);
                assert_eq!(parts.len(), 3);
            }
            other => panic!("expected composite, got {other:?}"),
        }
    }

    #[test]
    fn test_diagonal_sign() {
        let oracle = Transform::block(BlockRole::Oracle, vec![flip("011"), flip("100")]);
        assert_eq!(oracle.diagonal_sign(3), Some(-1));
        assert_eq!(oracle.diagonal_sign(4), Some(-1));
        assert_eq!(oracle.diagonal_sign(0), Some(1));

        let mixed = oracle.compose(Transform::Reflection { num_qubits: 3 });
        assert_eq!(mixed.diagonal_sign(3), None);
    }

    #[test]
    fn test_phase_flip_lowering() {
        let mut circuit = Circuit::with_size("flip", 3, 0);
        flip("011").append_to(&mut circuit).unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["x", "mcz", "x"]);
        assert_eq!(circuit.instructions()[0].qubits, vec![QubitId(2)]);
        assert_eq!(
            circuit.instructions()[1].qubits,
            vec![QubitId(0), QubitId(1), QubitId(2)]
        );
    }

    #[test]
    fn test_gate_count_matches_lowering() {
        let round = Transform::block(
            BlockRole::GroverIteration,
            vec![
                Transform::block(BlockRole::Oracle, vec![flip("0110"), flip("1111")]),
                Transform::Reflection { num_qubits: 4 },
            ],
        );
        let three = round.repeat(3);

        let mut circuit = Circuit::with_size("rounds", 4, 0);
        three.append_to(&mut circuit).unwrap();
        assert_eq!(three.gate_count(), circuit.num_ops() as u64);
        assert_eq!(round.gate_count(), (5 + 1) + 17);
    }

    #[test]
    fn test_single_qubit_flip_lowers_to_z() {
        let mut circuit = Circuit::with_size("flip", 1, 0);
        flip("0").append_to(&mut circuit).unwrap();
        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["x", "z", "x"]);
    }

    #[test]
    fn test_reflection_lowering() {
        let mut circuit = Circuit::with_size("diffusion", 2, 0);
        Transform::Reflection { num_qubits: 2 }
            .append_to(&mut circuit)
            .unwrap();

        let ops = circuit.count_ops();
        assert_eq!(ops.get("h"), Some(&4));
        assert_eq!(ops.get("x"), Some(&4));
        assert_eq!(ops.get("cz"), Some(&1));
    }
}
