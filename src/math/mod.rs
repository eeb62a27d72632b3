//! Numerical support utilities.

pub mod rng;

pub use rng::{RngKind, UniformRng, stream_seed};
