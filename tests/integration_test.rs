use std::collections::BTreeSet;

use zeta_grover::backend::{Backend, BackendSpec};
use zeta_grover::error::BuildError;
use zeta_grover::grover::{self, iteration_count, GroverBuilder};
use zeta_grover::ir::{Axis, Operation};
use zeta_grover::zeta::{zero_indices, InfluenceConfig, InfluenceMap};

#[test]
fn test_two_qubit_search_for_three() {
    let circuit = grover::build(2, [3]).expect("Failed to build circuit");

    assert_eq!(circuit.num_qubits(), 2);
    assert_eq!(circuit.num_cbits(), 2);
    // 2 H, oracle (3), diffusion (2 H, 2 X, 3, 2 X, 2 H), 2 measurements
    assert_eq!(circuit.operations().len(), 18);

    let counts = circuit.count_ops();
    assert_eq!(counts.get("h"), Some(&(2 + 2 + 2 + 2 + 2)));
    assert_eq!(counts.get("x"), Some(&4));
    assert_eq!(counts.get("cx"), Some(&2));
    assert_eq!(counts.get("measure"), Some(&2));
}

#[test]
fn test_empty_marked_set_is_superposition_and_measurement() {
    for n in 1..=6 {
        let circuit = grover::build(n, []).unwrap();
        assert_eq!(circuit.gate_count(), 2 * n);
        for (q, op) in circuit.operations()[..n].iter().enumerate() {
            assert_eq!(
                *op,
                Operation::Rotation {
                    axis: Axis::Hadamard,
                    angle: std::f64::consts::PI,
                    qubit: q
                }
            );
        }
        for (q, op) in circuit.operations()[n..].iter().enumerate() {
            assert_eq!(*op, Operation::measure(q, q));
        }
    }
}

#[test]
fn test_build_errors() {
    assert_eq!(
        grover::build(3, [8]).unwrap_err(),
        BuildError::OutOfRangeMarkedState {
            state: 8,
            num_qubits: 3,
            space: 8
        }
    );
    assert_eq!(
        grover::build(0, [0]).unwrap_err(),
        BuildError::InvalidRegisterSize(0)
    );
}

#[test]
fn test_ten_qubits_fifty_marked() {
    let grover = GroverBuilder::new().build(10, 0..50).unwrap();
    assert_eq!(grover.iterations, iteration_count(10, 50));
    assert_eq!(grover.iterations, 3);

    let oracle: usize = (0..50u64)
        .map(|t| 2 * (10 - t.count_ones() as usize) + 3)
        .sum();
    assert_eq!(grover.circuit.gate_count(), 10 + 3 * (oracle + 43) + 10);
}

#[test]
fn test_oracle_blocks_are_symmetric() {
    // Every target's X layer before the phase flip is undone right after it.
    let grover = GroverBuilder::new().max_iterations(1).build(4, [2, 5, 9]).unwrap();
    let ops = &grover.circuit.operations()[4..];

    let mut i = 0;
    for &target in &grover.marked {
        let flips = (0..4u32).filter(|&q| (target >> q) & 1 == 0).count();
        let before = &ops[i..i + flips];
        let after = &ops[i + flips + 3..i + 2 * flips + 3];
        assert_eq!(before, after);
        assert!(before.iter().all(|op| op.name() == "x"));
        assert_eq!(ops[i + flips + 1], Operation::mcx(vec![0, 1, 2], 3));
        i += 2 * flips + 3;
    }
}

#[test]
fn test_zero_marked_set_on_six_qubits() {
    let marked = zero_indices(6, 10);
    let grover = GroverBuilder::new().build(6, marked.clone()).unwrap();
    assert_eq!(grover.marked, marked.into_iter().collect::<Vec<_>>());
    // floor(pi/4 * sqrt(64 / 11)) = 1
    assert_eq!(grover.iterations, 1);
}

#[test]
fn test_influence_marked_set_builds() {
    let map = InfluenceMap::generate(4, &InfluenceConfig::default()).unwrap();
    let marked = map.marked(0.5);
    let grover = GroverBuilder::new().build(4, marked).unwrap();
    assert_eq!(grover.marked.len(), 8);
    assert_eq!(grover.iterations, 1);
}

#[test]
fn test_backend_ceiling_and_report() {
    let spec: BackendSpec = serde_json::from_str(
        r#"{"name": "heavy_hex", "num_qubits": 4, "basis_gates": ["cz", "id", "rz", "sx", "x"]}"#,
    )
    .unwrap();
    let backend = Backend::from(spec);

    let builder = GroverBuilder::new().with_backend(&backend);
    assert!(matches!(
        builder.build(5, [1]),
        Err(BuildError::QubitLimitExceeded { limit: 4, .. })
    ));

    let circuit = builder.build(3, [1]).unwrap().into_circuit();
    let report = backend.check(&circuit);
    assert!(report.fits);
    assert_eq!(
        report.missing_gates,
        ["ccx", "h"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>()
    );
}

#[test]
fn test_circuit_json_handoff() {
    let circuit = grover::build(3, [6]).unwrap();
    let json = serde_json::to_string(&circuit).unwrap();
    assert!(json.contains(r#""op":"multi_controlled_x""#));
    let back: zeta_grover::ir::Circuit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, circuit);
}
