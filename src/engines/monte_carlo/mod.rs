//! Monte Carlo estimation of arithmetic-average option prices.

pub mod asian_mc;

pub use asian_mc::{AsianMcEngine, price_asian_mc};
