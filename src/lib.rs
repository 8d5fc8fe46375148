//! Deterministic Grover search circuits.
//!
//! [`grover::build`] turns a register size and a set of marked basis states
//! into a gate sequence: equal superposition, `floor(pi/4 * sqrt(N/M))`
//! rounds of oracle and diffusion, then one measurement per qubit. Marked
//! sets can be written by hand ([`parser::parse_marked_set`]) or derived
//! from the Riemann zeta zeros ([`zeta`]). Finished circuits are checked
//! against a [`backend::Backend`] and run through an
//! [`execution::Executor`].

pub mod backend;
pub mod error;
pub mod execution;
pub mod grover;
pub mod ir;
pub mod parser;
pub mod zeta;
