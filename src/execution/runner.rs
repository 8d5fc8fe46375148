use super::counts::Counts;
use super::job::{JobId, JobStatus};
use crate::backend::Backend;
use crate::error::{ExecError, ExecResult};
use crate::ir::Circuit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// A remote service that runs circuits and returns measurement histograms.
///
/// Implementations talk to a concrete cloud API; they take their
/// credentials from the [`ExecutionConfig`] handed to `submit`.
pub trait Executor {
    /// Name of the service or device.
    fn name(&self) -> &str;

    /// The device circuits will run on.
    fn target(&self) -> &Backend;

    /// Queues `circuit` for `config.shots` shots.
    fn submit(&self, circuit: &Circuit, config: &ExecutionConfig) -> ExecResult<JobId>;

    fn status(&self, job: &JobId) -> ExecResult<JobStatus>;

    /// Histogram of a completed job.
    fn result(&self, job: &JobId) -> ExecResult<Counts>;
}

/// Settings for one execution.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub shots: u32,
    /// Pause between status polls.
    pub poll_interval_ms: u64,
    /// Give up waiting after this long.
    pub timeout_secs: u64,
    /// Extra attempts for transient failures per call.
    pub max_retries: u32,
    /// API token for the service.
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            shots: 4096,
            poll_interval_ms: 2000,
            timeout_secs: 7200,
            max_retries: 3,
            token: None,
        }
    }
}

impl ExecutionConfig {
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ExecutionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionConfig")
            .field("shots", &self.shots)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Calls `op`, retrying transient failures up to `max_retries` times.
///
/// Retries stop at `deadline`; the last transient error is returned then.
fn with_retries<T>(
    what: &str,
    config: &ExecutionConfig,
    deadline: Option<Instant>,
    mut op: impl FnMut() -> ExecResult<T>,
) -> ExecResult<T> {
    let mut attempt = 0;
    loop {
        match op() {
            Err(e) if e.is_transient() && attempt < config.max_retries => {
                let pause = match deadline {
                    Some(deadline) => {
                        let left = deadline.saturating_duration_since(Instant::now());
                        if left.is_zero() {
                            return Err(e);
                        }
                        left.min(config.poll_interval())
                    }
                    None => config.poll_interval(),
                };
                attempt += 1;
                warn!(attempt, error = %e, "{what} failed, retrying");
                thread::sleep(pause);
            }
            other => return other,
        }
    }
}

fn timed_out(job: &JobId, start: Instant) -> ExecError {
    ExecError::Timeout {
        job: job.to_string(),
        elapsed_secs: start.elapsed().as_secs_f64(),
    }
}

/// Submits `circuit`, polls until the job finishes and returns its counts.
///
/// # Errors
///
/// Fails without submitting when the shot count is zero or the circuit is
/// larger than the executor's device. After submission, transient errors
/// are retried until the timeout; a failed or cancelled job, or one still
/// pending after the timeout, is an error.
pub fn run_job<E: Executor + ?Sized>(
    executor: &E,
    circuit: &Circuit,
    config: &ExecutionConfig,
) -> ExecResult<Counts> {
    if config.shots == 0 {
        return Err(ExecError::InvalidShots(config.shots));
    }

    let target = executor.target();
    let report = target.check(circuit);
    if !report.fits {
        return Err(ExecError::TooManyQubits {
            required: circuit.num_qubits(),
            available: target.num_qubits,
        });
    }
    if !report.is_native() {
        info!(
            missing_gates = ?report.missing_gates,
            uncoupled_pairs = report.uncoupled_pairs.len(),
            "circuit needs rewriting by the service"
        );
    }

    let job = with_retries("submit", config, None, || executor.submit(circuit, config))?;
    info!(backend = executor.name(), %job, shots = config.shots, "job submitted");

    let start = Instant::now();
    let deadline = start + config.timeout();
    loop {
        let status = match with_retries("status", config, Some(deadline), || {
            executor.status(&job)
        }) {
            Ok(status) => status,
            Err(e) if e.is_transient() && Instant::now() >= deadline => {
                return Err(timed_out(&job, start))
            }
            Err(e) => return Err(e),
        };
        debug!(%job, %status, "polled job");

        match status {
            JobStatus::Completed => {
                let counts = with_retries("result", config, Some(deadline), || {
                    executor.result(&job)
                })?;
                info!(%job, outcomes = counts.len(), shots = counts.total(), "job completed");
                return Ok(counts);
            }
            JobStatus::Failed(reason) => {
                return Err(ExecError::JobFailed {
                    job: job.to_string(),
                    reason,
                });
            }
            JobStatus::Cancelled => return Err(ExecError::JobCancelled(job.to_string())),
            JobStatus::Queued | JobStatus::Running => {}
        }

        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return Err(timed_out(&job, start));
        }
        thread::sleep(left.min(config.poll_interval()));
    }
}
