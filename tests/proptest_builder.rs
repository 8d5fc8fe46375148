//! Property-based tests for Grover circuit construction.
//!
//! The builder is a pure function of the register size and the marked set,
//! so its output is checked exactly: ordering independence, the closed-form
//! gate count and the iteration formula.

use std::collections::BTreeSet;

use proptest::prelude::*;
use zeta_grover::grover::{iteration_count, GroverBuilder};
use zeta_grover::ir::Operation;

/// Register size 1-6 with up to 8 marked states inside it.
fn arb_problem() -> impl Strategy<Value = (usize, Vec<u64>)> {
    (1_usize..=6).prop_flat_map(|n| {
        let space = 1u64 << n;
        (Just(n), prop::collection::vec(0..space, 0..=8))
    })
}

fn expected_gate_count(n: usize, marked: &BTreeSet<u64>, iterations: usize) -> usize {
    let oracle: usize = marked
        .iter()
        .map(|&t| 2 * (n - (t.count_ones() as usize)) + 3)
        .sum();
    n + iterations * (oracle + 4 * n + 3) + n
}

proptest! {
    #[test]
    fn input_order_does_not_matter((n, marked) in arb_problem()) {
        let mut reversed = marked.clone();
        reversed.reverse();

        let a = GroverBuilder::new().build(n, marked).unwrap();
        let b = GroverBuilder::new().build(n, reversed).unwrap();
        prop_assert_eq!(a.circuit, b.circuit);
    }

    #[test]
    fn gate_count_matches_formula((n, marked) in arb_problem()) {
        let set: BTreeSet<u64> = marked.iter().copied().collect();
        let grover = GroverBuilder::new().build(n, marked).unwrap();

        prop_assert_eq!(grover.iterations, iteration_count(n, set.len()));
        prop_assert_eq!(
            grover.circuit.gate_count(),
            expected_gate_count(n, &set, grover.iterations)
        );
    }

    #[test]
    fn iteration_count_is_floor_and_positive(n in 1_usize..=16, m in 1_usize..64) {
        let space = 1usize << n;
        prop_assume!(m < space);

        let expected = (std::f64::consts::FRAC_PI_4 * (space as f64 / m as f64).sqrt()).floor();
        let count = iteration_count(n, m);
        prop_assert!(count >= 1);
        prop_assert_eq!(count, (expected as usize).max(1));
    }

    #[test]
    fn measurements_close_the_circuit((n, marked) in arb_problem()) {
        let circuit = GroverBuilder::new().build(n, marked).unwrap().into_circuit();
        let ops = circuit.operations();
        let tail = &ops[ops.len() - n..];
        for (q, op) in tail.iter().enumerate() {
            prop_assert_eq!(op, &Operation::measure(q, q));
        }
        prop_assert!(ops[..ops.len() - n].iter().all(|op| !op.is_measurement()));
    }

    #[test]
    fn out_of_range_always_rejected(n in 1_usize..=10, extra in 0u64..1000) {
        let state = (1u64 << n) + extra;
        prop_assert!(GroverBuilder::new().build(n, [0, state]).is_err());
    }
}
