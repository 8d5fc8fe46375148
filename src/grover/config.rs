use serde::{Deserialize, Serialize};

/// Default register ceiling for circuits built without a backend.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Builder settings, loadable from a JSON file.
///
/// ```
/// use zeta_grover::grover::BuilderConfig;
/// let config: BuilderConfig = serde_json::from_str(r#"{"max_oracle_targets": 4}"#).unwrap();
/// assert_eq!(config.max_qubits, 20);
/// assert_eq!(config.max_oracle_targets, Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Largest register the builder accepts.
    pub max_qubits: usize,
    /// Oracle-mark only the first k targets in ascending order.
    ///
    /// Shorter oracles keep the gate count within hardware limits at the
    /// price of amplifying fewer states.
    pub max_oracle_targets: Option<usize>,
    /// Upper bound on Grover iterations, trading success probability for
    /// circuit depth.
    pub max_iterations: Option<usize>,
    /// Insert full-register barriers between stages.
    pub barriers: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            max_oracle_targets: None,
            max_iterations: None,
            barriers: false,
        }
    }
}
