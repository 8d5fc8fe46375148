use crate::ir::{Circuit, Operation};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Operations every backend accepts regardless of its basis set.
const ALWAYS_SUPPORTED: [&str; 2] = ["measure", "barrier"];

/// Backend Specification
///
/// Describes an execution target: how many qubits it has, which gate names
/// it executes natively and which physical qubits can interact.
#[derive(Debug, Clone)]
pub struct Backend {
    pub name: String,
    pub num_qubits: usize,
    pub basis_gates: HashSet<String>,
    /// Coupling map representing physical qubit connectivity.
    /// Nodes are physical qubits, edges represent allowed 2-qubit gates.
    /// A map without edges is treated as all-to-all.
    pub coupling_map: Graph<(), (), Directed>,
}

/// Serializable form of a [`Backend`], as loaded from a target file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSpec {
    pub name: String,
    pub num_qubits: usize,
    #[serde(default)]
    pub basis_gates: Vec<String>,
    #[serde(default)]
    pub coupling_map: Vec<(usize, usize)>,
}

/// Findings from checking a circuit against a backend.
///
/// The check only reports; rewriting gates or routing qubits is left to the
/// execution service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendReport {
    /// Whether the circuit's register fits on the backend.
    pub fits: bool,
    /// Gate names used by the circuit but absent from the basis set.
    pub missing_gates: BTreeSet<String>,
    /// Control/target pairs with no coupling edge in either direction.
    pub uncoupled_pairs: BTreeSet<(usize, usize)>,
}

impl BackendReport {
    /// True when the circuit runs on the backend without any rewriting.
    pub fn is_native(&self) -> bool {
        self.fits && self.missing_gates.is_empty() && self.uncoupled_pairs.is_empty()
    }
}

impl Backend {
    pub fn new(name: String, num_qubits: usize) -> Self {
        let mut graph = Graph::new();
        // Initialize nodes for each qubit
        for _ in 0..num_qubits {
            graph.add_node(());
        }

        Self {
            name,
            num_qubits,
            basis_gates: HashSet::new(),
            coupling_map: graph,
        }
    }

    pub fn add_basis_gate(&mut self, gate: &str) {
        self.basis_gates.insert(gate.to_string());
    }

    /// Sets the coupling map from a list of edges.
    /// Edges are directed: (source, target).
    pub fn set_coupling_map(&mut self, edges: Vec<(usize, usize)>) {
        self.coupling_map.clear_edges();
        for (u, v) in edges {
            // Ensure indices are within bounds
            if u < self.num_qubits && v < self.num_qubits {
                self.coupling_map
                    .add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
            }
        }
    }

    /// Whether two physical qubits can interact directly.
    pub fn are_coupled(&self, a: usize, b: usize) -> bool {
        if a >= self.num_qubits || b >= self.num_qubits {
            return false;
        }
        if self.coupling_map.edge_count() == 0 {
            return true;
        }
        let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
        self.coupling_map.contains_edge(a, b) || self.coupling_map.contains_edge(b, a)
    }

    fn supports(&self, gate: &str) -> bool {
        self.basis_gates.is_empty()
            || ALWAYS_SUPPORTED.contains(&gate)
            || self.basis_gates.contains(gate)
    }

    /// Checks a circuit against this backend's size, basis and connectivity.
    ///
    /// An empty basis set accepts every gate.
    pub fn check(&self, circuit: &Circuit) -> BackendReport {
        let mut report = BackendReport {
            fits: circuit.num_qubits() <= self.num_qubits,
            ..BackendReport::default()
        };

        for op in circuit.operations() {
            let name = op.name();
            if !self.supports(&name) {
                report.missing_gates.insert(name);
            }

            let pairs: Vec<(usize, usize)> = match op {
                Operation::Entangler {
                    control, target, ..
                } => vec![(*control, *target)],
                Operation::MultiControlledX { controls, target } => {
                    controls.iter().map(|&c| (c, *target)).collect()
                }
                _ => Vec::new(),
            };
            for (c, t) in pairs {
                if !self.are_coupled(c, t) {
                    report.uncoupled_pairs.insert((c, t));
                }
            }
        }

        report
    }
}

impl From<BackendSpec> for Backend {
    fn from(spec: BackendSpec) -> Self {
        let mut backend = Backend::new(spec.name, spec.num_qubits);
        for gate in &spec.basis_gates {
            backend.add_basis_gate(gate);
        }
        backend.set_coupling_map(spec.coupling_map);
        backend
    }
}
