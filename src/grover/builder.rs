use super::config::BuilderConfig;
use super::iteration_count;
use crate::backend::Backend;
use crate::error::{BuildError, BuildResult};
use crate::ir::{Circuit, Operation};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Registers beyond this size cannot index their states with `u64`.
const MAX_ADDRESSABLE_QUBITS: usize = 63;

/// A built Grover circuit together with what it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct GroverCircuit {
    /// The finished, measured circuit.
    pub circuit: Circuit,
    /// Targets actually oracle-marked, ascending.
    pub marked: Vec<u64>,
    /// Number of oracle + diffusion rounds applied.
    pub iterations: usize,
}

impl GroverCircuit {
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }
}

/// Configurable Grover circuit builder.
///
/// # Examples
///
/// ```
/// use zeta_grover::grover::GroverBuilder;
/// let grover = GroverBuilder::new().build(2, [3]).unwrap();
/// assert_eq!(grover.iterations, 1);
/// assert_eq!(grover.circuit.gate_count(), 18);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GroverBuilder {
    config: BuilderConfig,
}

impl GroverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Lowers the qubit ceiling to what `backend` offers.
    pub fn with_backend(mut self, backend: &Backend) -> Self {
        self.config.max_qubits = self.config.max_qubits.min(backend.num_qubits);
        self
    }

    pub fn max_qubits(mut self, limit: usize) -> Self {
        self.config.max_qubits = limit;
        self
    }

    pub fn max_oracle_targets(mut self, limit: usize) -> Self {
        self.config.max_oracle_targets = Some(limit);
        self
    }

    pub fn max_iterations(mut self, limit: usize) -> Self {
        self.config.max_iterations = Some(limit);
        self
    }

    pub fn barriers(mut self, enabled: bool) -> Self {
        self.config.barriers = enabled;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Validates the inputs and returns the ascending set of targets to mark.
    ///
    /// Every input value is range-checked, including ones a target cap would
    /// later cut off.
    fn prepare(
        &self,
        num_qubits: usize,
        marked: impl IntoIterator<Item = u64>,
    ) -> BuildResult<Vec<u64>> {
        if num_qubits < 1 {
            return Err(BuildError::InvalidRegisterSize(num_qubits));
        }
        let limit = self.config.max_qubits.min(MAX_ADDRESSABLE_QUBITS);
        if num_qubits > limit {
            return Err(BuildError::QubitLimitExceeded {
                requested: num_qubits,
                limit,
            });
        }

        let space = 1u64 << num_qubits;
        let mut targets = BTreeSet::new();
        for state in marked {
            if state >= space {
                return Err(BuildError::OutOfRangeMarkedState {
                    state,
                    num_qubits,
                    space,
                });
            }
            targets.insert(state);
        }

        let mut targets: Vec<u64> = targets.into_iter().collect();
        if let Some(cap) = self.config.max_oracle_targets {
            if targets.len() > cap {
                warn!(
                    requested = targets.len(),
                    kept = cap,
                    "truncating oracle targets"
                );
                targets.truncate(cap);
            }
        }
        Ok(targets)
    }

    /// Builds the Grover circuit for `num_qubits` qubits amplifying `marked`.
    ///
    /// The marked states may arrive in any order and with repeats; the
    /// circuit depends only on the set they form.
    ///
    /// # Errors
    ///
    /// Returns an error before any gate is built if the register size is zero
    /// or above the ceiling, or if a marked state is not below `2^num_qubits`.
    pub fn build(
        &self,
        num_qubits: usize,
        marked: impl IntoIterator<Item = u64>,
    ) -> BuildResult<GroverCircuit> {
        let targets = self.prepare(num_qubits, marked)?;

        let mut iterations = iteration_count(num_qubits, targets.len());
        if let Some(cap) = self.config.max_iterations {
            iterations = iterations.min(cap);
        }
        debug!(
            num_qubits,
            marked = targets.len(),
            iterations,
            "building grover circuit"
        );

        let mut circuit = Circuit::new(num_qubits, num_qubits);
        circuit.add_layer(Operation::h)?;
        self.stage_boundary(&mut circuit)?;

        for _ in 0..iterations {
            for &target in &targets {
                append_oracle(&mut circuit, target)?;
            }
            self.stage_boundary(&mut circuit)?;
            append_diffusion(&mut circuit)?;
            self.stage_boundary(&mut circuit)?;
        }

        circuit.measure_all()?;
        debug!(gates = circuit.gate_count(), "grover circuit ready");

        Ok(GroverCircuit {
            circuit,
            marked: targets,
            iterations,
        })
    }

    fn stage_boundary(&self, circuit: &mut Circuit) -> BuildResult<()> {
        if self.config.barriers {
            circuit.barrier()?;
        }
        Ok(())
    }
}

/// Phase inversion of the all-ones state: H, multi-controlled X onto the
/// last qubit, H.
fn append_phase_flip(circuit: &mut Circuit) -> BuildResult<()> {
    let last = circuit.num_qubits() - 1;
    circuit.add_op(Operation::h(last))?;
    circuit.add_op(Operation::mcx((0..last).collect(), last))?;
    circuit.add_op(Operation::h(last))?;
    Ok(())
}

/// X on every qubit whose bit in `target` is 0; qubit i holds bit i.
fn append_zero_flips(circuit: &mut Circuit, target: u64) -> BuildResult<()> {
    for q in 0..circuit.num_qubits() {
        if (target >> q) & 1 == 0 {
            circuit.add_op(Operation::x(q))?;
        }
    }
    Ok(())
}

fn append_oracle(circuit: &mut Circuit, target: u64) -> BuildResult<()> {
    append_zero_flips(circuit, target)?;
    append_phase_flip(circuit)?;
    append_zero_flips(circuit, target)
}

fn append_diffusion(circuit: &mut Circuit) -> BuildResult<()> {
    circuit.add_layer(Operation::h)?;
    circuit.add_layer(Operation::x)?;
    append_phase_flip(circuit)?;
    circuit.add_layer(Operation::x)?;
    circuit.add_layer(Operation::h)?;
    Ok(())
}
