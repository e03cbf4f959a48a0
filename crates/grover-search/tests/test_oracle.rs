//! Tests for phase-oracle construction and its gate-level lowering.

use grover_ir::{Circuit, InstructionKind, StandardGate};
use grover_search::{OracleCircuit, SearchError};
use proptest::prelude::*;

/// Push a basis state through a circuit made of X and Z-family gates only,
/// returning the output index and the accumulated sign.
fn run_diagonal_circuit(circuit: &Circuit, mut index: u64) -> (u64, i8) {
    let mut sign = 1i8;
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(StandardGate::X) => index ^= inst.qubits[0].mask(),
            InstructionKind::Gate(g) if g.z_controls().is_some() => {
                if inst.qubits.iter().all(|q| index & q.mask() != 0) {
                    sign = -sign;
                }
            }
            other => panic!("oracle should only contain X and Z gates, found {other:?}"),
        }
    }
    (index, sign)
}

// ---------------------------------------------------------------------------
// Phase-flip semantics
// ---------------------------------------------------------------------------

#[test]
fn flips_exactly_the_marked_states_over_all_basis_states() {
    let oracle = OracleCircuit::from_marked_states(&["011", "100"]).unwrap();
    let circuit = oracle.to_circuit().unwrap();

    for x in 0..8u64 {
        let (out, sign) = run_diagonal_circuit(&circuit, x);
        assert_eq!(out, x, "oracle must leave basis state {x} in place");
        let expected = if x == 3 || x == 4 { -1 } else { 1 };
        assert_eq!(sign, expected, "wrong phase on basis state {x}");
        assert_eq!(oracle.phase(x), expected);
    }
}

#[test]
fn applying_twice_is_identity() {
    let oracle = OracleCircuit::from_marked_states(&["0101", "1110", "0000"]).unwrap();
    let once = oracle.to_circuit().unwrap();
    let mut twice = once.clone();
    twice.compose(&once).unwrap();

    for x in 0..16u64 {
        assert_eq!(run_diagonal_circuit(&twice, x), (x, 1));
    }
}

#[test]
fn order_of_marked_states_does_not_matter() {
    let a = OracleCircuit::from_marked_states(&["011", "100", "110"]).unwrap();
    let b = OracleCircuit::from_marked_states(&["110", "011", "100"]).unwrap();
    for x in 0..8u64 {
        assert_eq!(a.flips_phase(x), b.flips_phase(x));
    }
}

#[test]
fn same_input_builds_the_same_oracle() {
    let states = ["0101", "1110", "0000"];
    let a = OracleCircuit::from_marked_states(&states).unwrap();
    let b = OracleCircuit::from_marked_states(&states).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_circuit().unwrap(), b.to_circuit().unwrap());
    for x in 0..16u64 {
        assert_eq!(a.phase(x), b.phase(x));
    }
}

#[test]
fn smallest_problem_is_a_single_conjugated_z() {
    let oracle = OracleCircuit::from_marked_states(&["0"]).unwrap();
    let circuit = oracle.to_circuit().unwrap();
    let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["x", "z", "x"]);
    assert_eq!(run_diagonal_circuit(&circuit, 0), (0, -1));
    assert_eq!(run_diagonal_circuit(&circuit, 1), (1, 1));
}

#[test]
fn all_ones_state_needs_no_conjugation() {
    let oracle = OracleCircuit::from_marked_states(&["111"]).unwrap();
    let circuit = oracle.to_circuit().unwrap();
    assert_eq!(circuit.count_ops().get("x"), None);
    assert_eq!(circuit.count_ops().get("mcz"), Some(&1));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn unequal_lengths_are_rejected() {
    let err = OracleCircuit::from_marked_states(&["01", "101"]).unwrap_err();
    assert!(matches!(err, SearchError::InvalidInput(_)));
    assert!(err.to_string().contains("length"));
}

#[test]
fn non_binary_characters_are_rejected() {
    for bad in ["012", "a", " 1", "1 0"] {
        assert!(
            matches!(
                OracleCircuit::from_marked_states(&[bad]),
                Err(SearchError::InvalidInput(_))
            ),
            "'{bad}' should be rejected"
        );
    }
}

#[test]
fn empty_inputs_are_rejected() {
    let none: Vec<String> = Vec::new();
    assert!(matches!(
        OracleCircuit::from_marked_states(&none),
        Err(SearchError::InvalidInput(_))
    ));
    assert!(matches!(
        OracleCircuit::from_marked_states(&[""]),
        Err(SearchError::InvalidInput(_))
    ));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// A register width and a non-empty set of distinct indices inside it.
fn arb_marked_set() -> impl Strategy<Value = (u32, Vec<u64>)> {
    (1_u32..=6).prop_flat_map(|n| {
        let space = 1u64 << n;
        (
            Just(n),
            prop::collection::btree_set(0..space, 1..=(space as usize).min(6))
                .prop_map(|set| set.into_iter().collect::<Vec<_>>()),
        )
    })
}

fn to_bits(index: u64, n: u32) -> String {
    format!("{index:0width$b}", width = n as usize)
}

proptest! {
    /// The lowered oracle negates exactly the marked basis states and
    /// permutes nothing.
    #[test]
    fn lowered_oracle_matches_marked_set((n, marked) in arb_marked_set()) {
        let states: Vec<String> = marked.iter().map(|&i| to_bits(i, n)).collect();
        let oracle = OracleCircuit::from_marked_states(&states).unwrap();
        let circuit = oracle.to_circuit().unwrap();

        for x in 0..(1u64 << n) {
            let (out, sign) = run_diagonal_circuit(&circuit, x);
            prop_assert_eq!(out, x);
            let expected = if marked.contains(&x) { -1 } else { 1 };
            prop_assert_eq!(sign, expected);
            prop_assert_eq!(oracle.flips_phase(x), marked.contains(&x));
        }
    }
}
