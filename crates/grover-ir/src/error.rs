//! Errors raised while building circuits.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Circuit construction errors.
///
/// `op` names the offending instruction (`"h"`, `"mcz"`, `"measure"`, ...).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand is outside the quantum register.
    #[error("{op}: qubit {qubit} is outside the register")]
    QubitNotFound { qubit: QubitId, op: &'static str },

    /// A measurement target is outside the classical register.
    #[error("{op}: clbit {clbit} is outside the classical register")]
    ClbitNotFound { clbit: ClbitId, op: &'static str },

    /// Operand count does not match the gate's arity.
    #[error("{op}: expects {expected} qubits, got {got}")]
    QubitCountMismatch {
        op: &'static str,
        expected: u32,
        got: u32,
    },

    /// The same qubit appears twice among one instruction's operands.
    #[error("{op}: qubit {qubit} used twice")]
    DuplicateQubit { qubit: QubitId, op: &'static str },

    /// A circuit was composed onto a narrower one.
    #[error("cannot compose a {got}-wide circuit onto a {expected}-wide circuit")]
    WidthMismatch { expected: u32, got: u32 },

    #[error("invalid instruction: {0}")]
    InvalidInstruction(String),
}

/// Result alias for circuit construction.
pub type IrResult<T> = Result<T, IrError>;
