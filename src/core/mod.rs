//! Core traits, common domain types, and library-wide result/error structures.

use std::collections::HashMap;

use crate::market::Market;

pub mod cancel;
pub mod error;
pub mod types;

pub use cancel::CancelToken;
pub use error::PricingError;
pub use types::*;

/// Common trait implemented by every priceable instrument.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics and bindings.
    fn instrument_type(&self) -> &str;
}

/// Pricing engine abstraction over an instrument type.
pub trait PricingEngine<I: Instrument> {
    /// Prices an instrument under the provided market state.
    fn price(&self, instrument: &I, market: &Market) -> Result<PricingResult, PricingError>;
}

/// Unified engine result payload.
#[derive(Debug, Clone)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Standard error (Monte Carlo only).
    pub stderr: Option<f64>,
    /// Replication delta at the valuation root, when the engine produces one.
    pub delta: Option<f64>,
    /// Engine-specific scalar diagnostics.
    pub diagnostics: HashMap<String, f64>,
}
