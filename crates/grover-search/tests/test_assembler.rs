//! Tests for iteration counts and full-circuit assembly.

use grover_search::{
    AmplificationOperator, MAX_AMPLIFICATION_GATES, MAX_QUBITS, OracleCircuit, SearchError,
    assemble, build_grover_search_circuit, optimal_iterations, success_probability,
};

fn operator(states: &[&str]) -> AmplificationOperator {
    AmplificationOperator::new(OracleCircuit::from_marked_states(states).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Iteration count
// ---------------------------------------------------------------------------

#[test]
fn optimal_iterations_follow_the_closed_form() {
    for n in 1..=16u32 {
        for m in [1u64, 2, 3, 5] {
            let expected = (std::f64::consts::PI / 4.0 * ((1u64 << n) as f64 / m as f64).sqrt())
                .floor() as u64;
            assert_eq!(optimal_iterations(n, m).unwrap(), expected, "n={n} m={m}");
        }
    }
}

#[test]
fn optimal_count_gives_high_success_when_few_states_are_marked() {
    for n in 3..=12u32 {
        let k = optimal_iterations(n, 1).unwrap();
        assert!(success_probability(n, 1, k) > 0.9, "n={n} k={k}");
    }
}

#[test]
fn widest_problem_fits_the_gate_budget() {
    // An all-zero state is the costliest single flip to lower.
    let op = operator(&["0".repeat(MAX_QUBITS as usize).as_str()]);
    let k = optimal_iterations(MAX_QUBITS, 1).unwrap();
    assert_eq!(k, 3216);
    assert!(k * op.round().gate_count() <= MAX_AMPLIFICATION_GATES);
}

#[test]
fn zero_marked_states_is_division_by_zero() {
    assert!(matches!(
        optimal_iterations(4, 0),
        Err(SearchError::DivisionByZero)
    ));
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

#[test]
fn two_marked_states_on_three_qubits() {
    let search = build_grover_search_circuit(&["011", "100"]).unwrap();
    assert_eq!(search.num_qubits, 3);
    assert_eq!(search.optimal_iterations, 1);

    let summary = search.circuit.summary();
    assert_eq!(summary.superposition_gates, 3);
    assert_eq!(summary.oracle_applications, 1);
    assert_eq!(summary.diffusion_applications, 1);
    assert_eq!(summary.measurements, 3);

    let circuit = search.circuit.circuit();
    assert_eq!(circuit.num_qubits(), 3);
    assert_eq!(circuit.num_clbits(), 3);
    // Preparation layer, one round, then measurement.
    assert!(circuit.instructions()[..3].iter().all(|i| i.name() == "h"));
    assert!(circuit.instructions().last().unwrap().is_measure());
}

#[test]
fn zero_iterations_is_prepare_and_measure() {
    let sc = assemble(&operator(&["101"]), 0, 3).unwrap();
    let names: Vec<_> = sc.circuit().instructions().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["h", "h", "h", "measure"]);

    let summary = sc.summary();
    assert_eq!(summary.oracle_applications, 0);
    assert_eq!(summary.diffusion_applications, 0);
    assert!(sc.amplification().is_identity());
}

#[test]
fn rounds_scale_linearly() {
    let op = operator(&["0110"]);
    let one = assemble(&op, 1, 4).unwrap();
    let three = assemble(&op, 3, 4).unwrap();

    let round_ops = one.circuit().num_ops() - 5; // 4 H + 1 measure
    assert_eq!(three.circuit().num_ops(), 5 + 3 * round_ops);
    assert_eq!(three.summary().oracle_applications, 3);
    assert_eq!(three.summary().diffusion_applications, 3);
}

#[test]
fn negative_iterations_are_rejected() {
    let err = assemble(&operator(&["10"]), -1, 2).unwrap_err();
    assert!(matches!(err, SearchError::InvalidInput(_)));
}

#[test]
fn mismatched_register_width_is_rejected() {
    assert!(matches!(
        assemble(&operator(&["10"]), 1, 4),
        Err(SearchError::InvalidInput(_))
    ));
}

#[test]
fn summary_serializes() {
    let search = build_grover_search_circuit(&["11"]).unwrap();
    let json = serde_json::to_value(search.circuit.summary()).unwrap();
    assert_eq!(json["oracle_applications"], 1);
    assert_eq!(json["measurements"], 2);
}
