pub mod circuit;
pub mod gates;
pub mod operations;

// Re-export for easier access
pub use circuit::Circuit;
pub use gates::{Axis, EntanglerKind};
pub use operations::Operation;
