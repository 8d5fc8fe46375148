use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Rotation axis of a single-qubit gate.
///
/// The Hadamard axis is the diagonal (X + Z) / sqrt(2); a rotation of pi
/// about it is the Hadamard gate up to a global phase. Likewise a pi rotation
/// about X is the bit flip.
///
/// # Examples
///
/// ```
/// use zeta_grover::ir::Axis;
/// assert_eq!(Axis::Hadamard.name(), "h");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Pauli-X axis
    X,
    /// Pauli-Y axis
    Y,
    /// Pauli-Z axis
    Z,
    /// Diagonal X+Z axis
    Hadamard,
}

impl Axis {
    /// Name of the pi rotation about this axis in the usual gate vocabulary.
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::Hadamard => "h",
        }
    }

    /// Name of the parameterized rotation about this axis, if one exists.
    pub fn rotation_name(&self) -> Option<&'static str> {
        match self {
            Axis::X => Some("rx"),
            Axis::Y => Some("ry"),
            Axis::Z => Some("rz"),
            Axis::Hadamard => None,
        }
    }
}

/// Angle of a half turn, used for H and the Pauli flips.
pub const HALF_TURN: f64 = PI;

/// Two-qubit entangling gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntanglerKind {
    /// Controlled-NOT gate
    CX,
    /// Controlled-Z gate
    CZ,
    /// Swap gate
    SWAP,
}

impl EntanglerKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntanglerKind::CX => "cx",
            EntanglerKind::CZ => "cz",
            EntanglerKind::SWAP => "swap",
        }
    }
}

/// Basis-gate name of a multi-controlled X with the given number of controls.
///
/// Zero controls is a plain flip, one is CX, two is the Toffoli gate.
pub fn multi_controlled_name(num_controls: usize) -> String {
    match num_controls {
        0 => "x".to_string(),
        1 => "cx".to_string(),
        2 => "ccx".to_string(),
        n => format!("c{}x", n),
    }
}
