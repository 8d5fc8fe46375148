//! Handing built circuits to a remote execution service.
//!
//! The service itself is behind the [`Executor`] trait; this module owns the
//! job lifecycle around it (submission, polling with a timeout, retrying
//! transient failures) and the analysis of the returned histogram.

pub mod counts;
pub mod job;
pub mod runner;

pub use counts::{state_index, Counts};
pub use job::{JobId, JobStatus};
pub use runner::{run_job, ExecutionConfig, Executor};
