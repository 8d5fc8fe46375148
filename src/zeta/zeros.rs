use num_complex::Complex64;
use std::collections::BTreeSet;

/// The first ten non-trivial zeros of the Riemann zeta function, 1/2 + i·t.
pub const RIEMANN_ZEROS: [Complex64; 10] = [
    Complex64::new(0.5, 14.134725),
    Complex64::new(0.5, 21.022040),
    Complex64::new(0.5, 25.010858),
    Complex64::new(0.5, 30.424876),
    Complex64::new(0.5, 32.935062),
    Complex64::new(0.5, 37.586178),
    Complex64::new(0.5, 40.918719),
    Complex64::new(0.5, 43.327073),
    Complex64::new(0.5, 48.005151),
    Complex64::new(0.5, 49.773832),
];

/// The first `count` zeros (all of them if `count` exceeds the table).
pub fn zeros(count: usize) -> &'static [Complex64] {
    &RIEMANN_ZEROS[..count.min(RIEMANN_ZEROS.len())]
}

/// Marks the ground state plus `floor(t) mod 2^n` for each of the first
/// `count` zeros.
///
/// ```
/// use zeta_grover::zeta::zero_indices;
/// let marked: Vec<u64> = zero_indices(6, 5).into_iter().collect();
/// assert_eq!(marked, vec![0, 14, 21, 25, 30, 32]);
/// ```
pub fn zero_indices(num_qubits: usize, count: usize) -> BTreeSet<u64> {
    let space = 1u64 << num_qubits.min(63);
    let mut marked = BTreeSet::from([0]);
    for zero in zeros(count) {
        marked.insert(zero.im.floor() as u64 % space);
    }
    marked
}
