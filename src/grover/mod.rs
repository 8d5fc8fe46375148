//! Grover search circuit construction.
//!
//! A Grover circuit puts every qubit into equal superposition, then repeats
//! an oracle (phase inversion of each marked state) followed by the
//! diffusion operator (inversion about the mean), and finally measures each
//! qubit into the classical bit of the same index.

pub mod builder;
pub mod config;

pub use builder::{GroverBuilder, GroverCircuit};
pub use config::{BuilderConfig, DEFAULT_MAX_QUBITS};

use crate::error::BuildResult;
use crate::ir::Circuit;
use std::f64::consts::FRAC_PI_4;

/// Number of oracle + diffusion rounds for `num_marked` targets among
/// `2^num_qubits` states: `floor(pi/4 * sqrt(N / M))`, at least 1.
///
/// No marked states means no rounds. Counts too large for `usize`
/// saturate at `usize::MAX`.
pub fn iteration_count(num_qubits: usize, num_marked: usize) -> usize {
    if num_marked == 0 {
        return 0;
    }
    let exponent = i32::try_from(num_qubits).unwrap_or(i32::MAX);
    let space = 2f64.powi(exponent);
    let rounds = (FRAC_PI_4 * (space / num_marked as f64).sqrt()).floor();
    (rounds as usize).max(1)
}

/// Builds a Grover circuit with the default builder settings.
///
/// ```
/// let circuit = zeta_grover::grover::build(2, [3]).unwrap();
/// assert_eq!(circuit.gate_count(), 18);
/// ```
pub fn build(num_qubits: usize, marked: impl IntoIterator<Item = u64>) -> BuildResult<Circuit> {
    GroverBuilder::new()
        .build(num_qubits, marked)
        .map(GroverCircuit::into_circuit)
}
