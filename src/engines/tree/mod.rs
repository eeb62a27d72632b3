//! Recombining binomial lattice construction and backward-induction valuation.

pub mod lattice;
pub mod valuation;

pub use lattice::{Lattice, NodeKey};
pub use valuation::{
    BinomialTreeEngine, TreeValuation, discount_factor, risk_neutral_probability, value_option,
};
