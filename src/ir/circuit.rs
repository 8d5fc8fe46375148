use super::operations::Operation;
use crate::error::{IrError, IrResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Intermediate Representation of a Quantum Circuit.
///
/// A `Circuit` consists of a sequence of operations and metadata about the
/// number of qubits and classical bits required. Every appended operation is
/// checked against the register sizes, and once a measurement has been added
/// the circuit only accepts further measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    num_cbits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new empty circuit.
    ///
    /// # Arguments
    ///
    /// * `num_qubits` - The number of qubits to allocate.
    /// * `num_cbits` - The number of classical bits to allocate.
    pub fn new(num_qubits: usize, num_cbits: usize) -> Self {
        Self {
            num_qubits,
            num_cbits,
            operations: Vec::new(),
        }
    }

    /// Total number of qubits in the circuit.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Total number of classical bits in the circuit.
    pub fn num_cbits(&self) -> usize {
        self.num_cbits
    }

    /// Sequence of operations (gates, measurements, barriers).
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Adds an operation to the circuit.
    ///
    /// # Errors
    ///
    /// Fails if the operation references a qubit or classical bit outside the
    /// registers, repeats a qubit, or is not a measurement and the circuit
    /// has already been measured.
    pub fn add_op(&mut self, op: Operation) -> IrResult<()> {
        if self.is_measured() && !op.is_measurement() {
            return Err(IrError::AfterMeasurement(op.name()));
        }

        let qubits = op.qubits();
        for (i, &q) in qubits.iter().enumerate() {
            if q >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                });
            }
            if qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: op.name(),
                });
            }
        }

        if let Operation::Measure { cbit, .. } = op {
            if cbit >= self.num_cbits {
                return Err(IrError::CbitOutOfRange {
                    cbit,
                    num_cbits: self.num_cbits,
                });
            }
        }

        self.operations.push(op);
        Ok(())
    }

    /// Adds one operation per qubit, in ascending qubit order.
    pub fn add_layer(&mut self, gate: impl Fn(usize) -> Operation) -> IrResult<()> {
        for q in 0..self.num_qubits {
            self.add_op(gate(q))?;
        }
        Ok(())
    }

    /// Adds a barrier across the whole register.
    pub fn barrier(&mut self) -> IrResult<()> {
        self.add_op(Operation::Barrier {
            qubits: (0..self.num_qubits).collect(),
        })
    }

    /// Measures qubit i into classical bit i for every qubit.
    pub fn measure_all(&mut self) -> IrResult<()> {
        for q in 0..self.num_qubits {
            self.add_op(Operation::measure(q, q))?;
        }
        Ok(())
    }

    /// Returns true once a measurement has been appended.
    pub fn is_measured(&self) -> bool {
        self.operations.iter().any(Operation::is_measurement)
    }

    /// Number of operations, barriers included.
    pub fn size(&self) -> usize {
        self.operations.len()
    }

    /// Number of gates and measurements, barriers excluded.
    pub fn gate_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_gate()).count()
    }

    /// Gate counts keyed by gate name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(op.name()).or_insert(0) += 1;
        }
        counts
    }
}
