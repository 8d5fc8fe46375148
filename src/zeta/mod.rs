//! Marked-set sources derived from the non-trivial Riemann zeta zeros.

pub mod influence;
pub mod zeros;

pub use influence::{InfluenceConfig, InfluenceMap};
pub use zeros::{zero_indices, zeros, RIEMANN_ZEROS};
