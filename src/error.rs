//! Error types for circuit construction, marked-set sources and execution.

use thiserror::Error;

/// Errors raised while appending operations to a circuit.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the register.
    #[error("Qubit index out of bounds: q[{qubit}] (register has {num_qubits} qubits)")]
    QubitOutOfRange {
        /// The offending index.
        qubit: usize,
        /// Register size.
        num_qubits: usize,
    },

    /// Classical bit index outside the register.
    #[error("Classical bit index out of bounds: c[{cbit}] (register has {num_cbits} bits)")]
    CbitOutOfRange {
        /// The offending index.
        cbit: usize,
        /// Register size.
        num_cbits: usize,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation '{gate_name}'")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: usize,
        /// Name of the operation.
        gate_name: String,
    },

    /// A non-measurement operation after the measurement stage.
    #[error("Cannot append '{0}' after measurement")]
    AfterMeasurement(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

/// Errors raised by the Grover circuit builder.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum BuildError {
    /// Register size below one qubit.
    #[error("Invalid register size: {0} (at least 1 qubit required)")]
    InvalidRegisterSize(usize),

    /// Register larger than the configured or backend ceiling.
    #[error("Circuit requires {requested} qubits but the limit is {limit}")]
    QubitLimitExceeded {
        /// Qubits requested.
        requested: usize,
        /// Ceiling in force.
        limit: usize,
    },

    /// A marked index outside [0, 2^n).
    #[error("Marked state {state} is out of range for {num_qubits} qubits (must be < {space})")]
    OutOfRangeMarkedState {
        /// The offending state.
        state: u64,
        /// Register size.
        num_qubits: usize,
        /// Size of the state space, 2^n.
        space: u64,
    },

    /// Circuit assembly failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for builder operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while parsing a marked-set expression.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// Input did not match the expression grammar.
    #[error("Parse error at: '{0}'")]
    Syntax(String),

    /// A range whose end lies before its start.
    #[error("Invalid range: {start}..{end}")]
    InvalidRange {
        /// Range start.
        start: u64,
        /// Range end.
        end: u64,
    },

    /// A range expanding to more states than any supported register holds.
    #[error("Range {start}-{last} expands to more than {limit} states")]
    RangeTooLarge {
        /// Range start.
        start: u64,
        /// Last state of the range.
        last: u64,
        /// Largest accepted expansion.
        limit: u64,
    },
}

/// Result type for marked-set parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised by the influence-map generator.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum InfluenceError {
    /// Bad generator parameters.
    #[error("Invalid influence configuration: {0}")]
    InvalidConfig(String),

    /// Register size the grid cannot be laid out for.
    #[error("Invalid register size for influence map: {0}")]
    InvalidRegisterSize(usize),
}

/// Result type for influence-map generation.
pub type InfluenceResult<T> = Result<T, InfluenceError>;

/// Errors raised while running a circuit on an executor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecError {
    /// Connectivity problem talking to the service.
    #[error("Network error: {0}")]
    Network(String),

    /// Backend temporarily not accepting work.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Credentials rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Circuit too large for backend.
    #[error("Circuit requires {required} qubits but backend only has {available}")]
    TooManyQubits {
        /// Qubits needed.
        required: usize,
        /// Qubits available.
        available: usize,
    },

    /// Shot count rejected.
    #[error("Invalid shots: {0}")]
    InvalidShots(u32),

    /// Job failed on the service.
    #[error("Job {job} failed: {reason}")]
    JobFailed {
        /// Job identifier.
        job: String,
        /// Reason reported by the service.
        reason: String,
    },

    /// Job was cancelled.
    #[error("Job {0} was cancelled")]
    JobCancelled(String),

    /// Timeout waiting for job.
    #[error("Timeout after {elapsed_secs:.1}s waiting for job {job}")]
    Timeout {
        /// Job identifier.
        job: String,
        /// Time spent polling.
        elapsed_secs: f64,
    },

    /// JSON error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExecError {
    /// Whether the failure is worth retrying.
    ///
    /// Only connectivity and availability problems are transient; everything
    /// else would fail again identically.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExecError::Network(_) | ExecError::BackendUnavailable(_))
    }
}

/// Result type for execution operations.
pub type ExecResult<T> = Result<T, ExecError>;
