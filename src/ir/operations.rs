use super::gates::{multi_controlled_name, Axis, EntanglerKind, HALF_TURN};
use serde::{Deserialize, Serialize};

/// Represents a single operation in the quantum circuit.
///
/// Operations can be rotations, entanglers, multi-controlled flips,
/// measurements, or barriers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// A single-qubit rotation.
    Rotation {
        /// Axis of rotation.
        axis: Axis,
        /// Rotation angle in radians.
        angle: f64,
        /// Index of the qubit acted on.
        qubit: usize,
    },
    /// A two-qubit entangling gate.
    Entangler {
        /// Kind of entangler (CX, CZ, SWAP).
        kind: EntanglerKind,
        /// Index of the control qubit.
        control: usize,
        /// Index of the target qubit.
        target: usize,
    },
    /// An X on `target` conditioned on every qubit in `controls` being 1.
    MultiControlledX {
        /// Control qubits, in order.
        controls: Vec<usize>,
        /// Index of the target qubit.
        target: usize,
    },
    /// A measurement operation.
    Measure {
        /// Index of the qubit to measure.
        qubit: usize,
        /// Index of the classical bit to store the result.
        cbit: usize,
    },
    /// A barrier to prevent optimizations across a boundary.
    Barrier {
        /// Indices of the qubits involved in the barrier.
        qubits: Vec<usize>,
    },
}

impl Operation {
    /// Hadamard on `qubit`.
    pub fn h(qubit: usize) -> Self {
        Operation::Rotation {
            axis: Axis::Hadamard,
            angle: HALF_TURN,
            qubit,
        }
    }

    /// Bit flip on `qubit`.
    pub fn x(qubit: usize) -> Self {
        Operation::Rotation {
            axis: Axis::X,
            angle: HALF_TURN,
            qubit,
        }
    }

    pub fn mcx(controls: Vec<usize>, target: usize) -> Self {
        Operation::MultiControlledX { controls, target }
    }

    pub fn measure(qubit: usize, cbit: usize) -> Self {
        Operation::Measure { qubit, cbit }
    }

    /// Qubits touched by this operation, controls before targets.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Operation::Rotation { qubit, .. } | Operation::Measure { qubit, .. } => vec![*qubit],
            Operation::Entangler {
                control, target, ..
            } => vec![*control, *target],
            Operation::MultiControlledX { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
            Operation::Barrier { qubits } => qubits.clone(),
        }
    }

    /// Gate name as a backend would list it in its basis set.
    ///
    /// Rotations by anything other than a half turn use the parameterized
    /// name (`rx`, `ry`, `rz`).
    pub fn name(&self) -> String {
        match self {
            Operation::Rotation { axis, angle, .. } => {
                if (*angle - HALF_TURN).abs() < 1e-12 {
                    axis.name().to_string()
                } else {
                    axis.rotation_name().unwrap_or("u").to_string()
                }
            }
            Operation::Entangler { kind, .. } => kind.name().to_string(),
            Operation::MultiControlledX { controls, .. } => multi_controlled_name(controls.len()),
            Operation::Measure { .. } => "measure".to_string(),
            Operation::Barrier { .. } => "barrier".to_string(),
        }
    }

    /// Returns true for operations counted as gates (everything but barriers).
    pub fn is_gate(&self) -> bool {
        !matches!(self, Operation::Barrier { .. })
    }

    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            Operation::h(2),
            Operation::Rotation {
                axis: Axis::Hadamard,
                angle: HALF_TURN,
                qubit: 2
            }
        );
        assert_eq!(Operation::x(0).name(), "x");
        assert_eq!(Operation::h(0).name(), "h");
    }

    #[test]
    fn test_parameterized_rotation_name() {
        let op = Operation::Rotation {
            axis: Axis::Z,
            angle: 0.25,
            qubit: 0,
        };
        assert_eq!(op.name(), "rz");
    }

    #[test]
    fn test_mcx_qubits_order() {
        let op = Operation::mcx(vec![0, 1, 2], 3);
        assert_eq!(op.qubits(), vec![0, 1, 2, 3]);
        assert_eq!(op.name(), "c3x");
    }

    #[test]
    fn test_barrier_not_a_gate() {
        assert!(!Operation::Barrier { qubits: vec![0, 1] }.is_gate());
        assert!(Operation::measure(0, 0).is_gate());
        assert!(Operation::measure(0, 0).is_measurement());
    }

    #[test]
    fn test_json_tagging() {
        let json = serde_json::to_string(&Operation::measure(1, 1)).unwrap();
        assert_eq!(json, r#"{"op":"measure","qubit":1,"cbit":1}"#);
    }
}
