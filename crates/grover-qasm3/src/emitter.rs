//! QASM3 emitter for serializing circuits.

use std::fmt::Write as _;

use grover_ir::{Circuit, ClbitId, Instruction, InstructionKind, QubitId, StandardGate};

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &Circuit) -> String {
    emit_with_comments::<&str>(circuit, &[])
}

/// Emit a circuit, preceded by `//` comment lines after the version line.
pub fn emit_with_comments<S: AsRef<str>>(circuit: &Circuit, comments: &[S]) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit, comments);
    emitter.output
}

/// QASM3 emitter.
struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit<S: AsRef<str>>(&mut self, circuit: &Circuit, comments: &[S]) {
        self.writeln("OPENQASM 3.0;");
        for comment in comments {
            self.writeln(&format!("// {}", comment.as_ref()));
        }
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        let num_qubits = circuit.num_qubits();
        if num_qubits > 0 {
            self.writeln(&format!("qubit[{num_qubits}] q;"));
        }
        let num_clbits = circuit.num_clbits();
        if num_clbits > 0 {
            self.writeln(&format!("bit[{num_clbits}] c;"));
        }
        if num_qubits > 0 || num_clbits > 0 {
            self.writeln("");
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction);
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        let qubits = emit_qubits(&instruction.qubits);
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = gate_name(gate);
                self.writeln(&format!("{name} {qubits};"));
            }

            InstructionKind::Measure => {
                for (q, c) in instruction.measured_pairs() {
                    self.writeln(&format!("{} = measure {};", clbit(c), qubit(q)));
                }
            }

            InstructionKind::Barrier => {
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }
    }

    fn writeln(&mut self, line: &str) {
        let _ = writeln!(self.output, "{line}");
    }
}

fn gate_name(gate: &StandardGate) -> String {
    match gate {
        StandardGate::MCZ(controls) => format!("ctrl({controls}) @ z"),
        other => other.name().to_string(),
    }
}

fn qubit(q: QubitId) -> String {
    format!("q[{}]", q.0)
}

fn clbit(c: ClbitId) -> String {
    format!("c[{}]", c.0)
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| qubit(*q))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_header() {
        let circuit = Circuit::with_size("empty", 2, 2);
        let qasm = emit(&circuit);
        let lines: Vec<_> = qasm.lines().collect();
        assert_eq!(lines[0], "OPENQASM 3.0;");
        assert_eq!(lines[1], "include \"stdgates.inc\";");
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("bit[2] c;"));
    }

    #[test]
    fn test_emit_gates() {
        let mut circuit = Circuit::with_size("gates", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.z(QubitId(0)).unwrap();
        circuit.cz(QubitId(0), QubitId(1)).unwrap();
        circuit.barrier_all().unwrap();

        let qasm = emit(&circuit);
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("x q[1];"));
        assert!(qasm.contains("z q[0];"));
        assert!(qasm.contains("cz q[0], q[1];"));
        assert!(qasm.contains("barrier q[0], q[1];"));
        assert!(!qasm.contains("bit["));
    }

    #[test]
    fn test_emit_mcz_as_controlled_z() {
        let mut circuit = Circuit::with_size("mcz", 4, 0);
        circuit
            .mcz(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(3))
            .unwrap();
        assert!(emit(&circuit).contains("ctrl(3) @ z q[0], q[1], q[2], q[3];"));
    }

    #[test]
    fn test_emit_comments() {
        let circuit = Circuit::with_size("c", 1, 0);
        let qasm = emit_with_comments(&circuit, &["marked: 1", "iterations: 1"]);
        let lines: Vec<_> = qasm.lines().collect();
        assert_eq!(lines[1], "// marked: 1");
        assert_eq!(lines[2], "// iterations: 1");
        assert_eq!(lines[3], "include \"stdgates.inc\";");
    }
}
