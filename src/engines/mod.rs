//! Pricing engine implementations.

pub mod hedge;
pub mod monte_carlo;
pub mod tree;
