//! The Grover amplification operator.

use grover_ir::Circuit;
use serde::Serialize;
use tracing::debug;

use crate::error::{SearchError, SearchResult};
use crate::oracle::OracleCircuit;
use crate::transform::{BlockRole, Transform};

/// One Grover round: the oracle followed by the diffusion reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmplificationOperator {
    oracle: OracleCircuit,
    round: Transform,
}

impl AmplificationOperator {
    /// Wrap `oracle` into a Grover round on the same register.
    pub fn new(oracle: OracleCircuit) -> SearchResult<Self> {
        let num_qubits = oracle.num_qubits();
        if num_qubits == 0 {
            return Err(SearchError::InvalidInput(
                "amplification needs an oracle over at least one qubit".into(),
            ));
        }

        let round = Transform::block(
            BlockRole::GroverIteration,
            vec![
                oracle.transform().clone(),
                Transform::Reflection { num_qubits },
            ],
        );
        debug!(num_qubits, "Built amplification operator");

        Ok(Self { oracle, round })
    }

    /// Register width.
    pub fn num_qubits(&self) -> u32 {
        self.oracle.num_qubits()
    }

    /// The oracle this operator amplifies.
    pub fn oracle(&self) -> &OracleCircuit {
        &self.oracle
    }

    /// A single round as a transform.
    pub fn round(&self) -> &Transform {
        &self.round
    }

    /// `k` rounds in sequence. `power(0)` is the identity.
    pub fn power(&self, k: usize) -> Transform {
        self.round.repeat(k)
    }

    /// Lower a single round to gates.
    pub fn to_circuit(&self) -> SearchResult<Circuit> {
        let mut circuit = Circuit::with_size("grover_op", self.num_qubits(), 0);
        self.round.append_to(&mut circuit)?;
        Ok(circuit)
    }
}
