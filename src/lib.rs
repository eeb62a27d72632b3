//! OpenLattice prices options on a discrete-time recombining binomial
//! lattice and simulates the cash-flow consequences of delta-hedging a
//! written option along one realized price path.
//!
//! The crate is built around three engines:
//! - lattice construction plus risk-neutral backward induction (European and
//!   American exercise), producing per-node value and delta tables;
//! - a path-replay delta-hedge simulator turning those tables into a
//!   time-indexed cash ledger with an interest-accruing account;
//! - an independent Monte Carlo estimator for fixed-strike arithmetic-average
//!   (Asian) payoffs on binomial paths.
//!
//! References used across modules include Hull, *Options, Futures, and Other
//! Derivatives* (11th ed.) Ch. 13 for lattice valuation and Glasserman
//! (2004) for Monte Carlo estimators.
//!
//! Numerical considerations:
//! - Node identity is the integer (up, down) move-count pair, never the
//!   floating price, so recombination is exact regardless of float rounding.
//! - All arithmetic is IEEE-754 `f64`; tests document their comparison
//!   tolerances.
//! - Market-parameter validation is eager: a risk-neutral probability
//!   outside `[0, 1]` fails before any induction or simulation starts.
//!
//! # Feature Flags
//! - `parallel`: enables Rayon-powered Monte Carlo path fan-out with
//!   per-worker partial reductions.
//!
//! # Quick Start
//! Price a European call by backward induction:
//! ```rust
//! use openlattice::engines::tree::{Lattice, value_option};
//! use openlattice::instruments::VanillaOption;
//!
//! let lattice = Lattice::build(100.0, 1.2, 0.8, 2).unwrap();
//! let option = VanillaOption::european_call(90.0, 2.0);
//! let valuation = value_option(&lattice, &option, 0.0).unwrap();
//! assert!((valuation.price() - 16.5).abs() < 1e-9);
//! ```
//!
//! Replay a delta hedge of a written put along a realized path:
//! ```rust
//! use openlattice::engines::hedge::{Path, simulate_hedge};
//! use openlattice::engines::tree::{Lattice, value_option};
//! use openlattice::instruments::VanillaOption;
//!
//! let lattice = Lattice::build(100.0, 1.2, 0.8, 4).unwrap();
//! let put = VanillaOption::american_put(105.0, 1.0);
//! let valuation = value_option(&lattice, &put, 0.02).unwrap();
//!
//! let path = Path::from_indices(&[0, 1, 1, 1]).unwrap();
//! let report = simulate_hedge(&lattice, &valuation, &put, 0.02, &path).unwrap();
//! assert_eq!(report.rows.len(), 5);
//! ```
//!
//! Estimate an Asian option price by Monte Carlo:
//! ```rust
//! use openlattice::core::OptionType;
//! use openlattice::engines::monte_carlo::price_asian_mc;
//!
//! let (price, stderr) =
//!     price_asian_mc(OptionType::Call, 100.0, 90.0, 2.0, 0.0, 1.2, 0.8, 2, 50_000, 42).unwrap();
//! assert!((price - 12.17).abs() < 10.0 * stderr);
//! ```

pub mod core;
pub mod engines;
pub mod instruments;
pub mod market;
pub mod math;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::hedge::*;
    pub use crate::engines::monte_carlo::*;
    pub use crate::engines::tree::*;
    pub use crate::instruments::*;
    pub use crate::market::*;
}
