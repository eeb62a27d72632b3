//! Arithmetic-average (Asian) option contract schema and validation rules.
//!
//! [`AsianOption`] is the fixed-strike arithmetic variant priced by the
//! Monte Carlo engine: the payoff applies the call/put rule to the arithmetic
//! average of the underlying over every lattice observation, inception
//! included (`N + 1` observations for an `N`-step simulation).
//! This module intentionally does not price; the `mc` engine consumes the
//! schema.

use crate::core::{Instrument, OptionType, PricingError};

/// Fixed-strike arithmetic-average Asian option instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsianOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
}

impl AsianOption {
    /// Builds a new Asian option.
    pub fn new(option_type: OptionType, strike: f64, expiry: f64) -> Self {
        Self {
            option_type,
            strike,
            expiry,
        }
    }

    /// Payoff of the contract against a realized arithmetic average.
    #[inline]
    pub fn payoff_on_average(&self, average: f64) -> f64 {
        self.option_type.payoff(average, self.strike)
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidArgument`] when `strike <= 0` or
    /// `expiry < 0`.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PricingError::InvalidArgument(
                "asian strike must be > 0".to_string(),
            ));
        }
        if !self.expiry.is_finite() || self.expiry < 0.0 {
            return Err(PricingError::InvalidArgument(
                "asian expiry must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Instrument for AsianOption {
    fn instrument_type(&self) -> &str {
        "AsianOption"
    }
}
