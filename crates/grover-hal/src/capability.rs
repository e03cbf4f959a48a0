//! Backend capability introspection.

use grover_ir::{Circuit, InstructionKind};
use serde::{Deserialize, Serialize};

/// What a backend can execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gates.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator.
    pub is_simulator: bool,
    /// Additional capability flags such as `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::grover(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into(), "exact_probabilities".into()],
        }
    }

    /// Whether the backend has `feature`.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gates a backend accepts, by IR name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Gate names (`"h"`, `"x"`, `"mcz"`, ...).
    pub gates: Vec<String>,
}

impl GateSet {
    /// Every gate a Grover search circuit is lowered to.
    pub fn grover() -> Self {
        Self {
            gates: ["id", "h", "x", "z", "cz", "mcz"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Gates used by `circuit` that this set lacks, in first-use order.
    pub fn unsupported_in(&self, circuit: &Circuit) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for inst in circuit.instructions() {
            if let InstructionKind::Gate(gate) = &inst.kind {
                let name = gate.name();
                if !self.contains(name) && !missing.contains(&name) {
                    missing.push(name);
                }
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grover_ir::QubitId;

    #[test]
    fn test_capabilities_simulator() {
        let caps = Capabilities::simulator(20);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.has_feature("statevector"));
        assert!(caps.gate_set.contains("mcz"));
    }

    #[test]
    fn test_unsupported_gates() {
        let set = GateSet {
            gates: vec!["h".into(), "x".into()],
        };
        let mut circuit = Circuit::with_size("t", 3, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cz(QubitId(0), QubitId(1)).unwrap();
        circuit.cz(QubitId(1), QubitId(2)).unwrap();
        circuit.z(QubitId(2)).unwrap();

        assert_eq!(set.unsupported_in(&circuit), vec!["cz", "z"]);
        assert!(GateSet::grover().unsupported_in(&circuit).is_empty());
    }
}
