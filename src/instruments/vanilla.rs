//! Canonical plain-vanilla option contract definition used throughout the library.
//!
//! [`VanillaOption`] stores side, strike, expiry, and exercise rights
//! ([`crate::core::ExerciseStyle`]: European/American).
//! Validation accepts `expiry == 0` (intrinsic-value edge case).
//! This type is the default input for the lattice valuator and the
//! delta-hedge replay simulator.

use crate::core::{ExerciseStyle, Instrument, OptionType, PricingError};

/// Vanilla option contract.
///
/// Strike `K`, expiry `T` in year fractions, option side, and exercise
/// rights.
///
/// # Examples
/// ```
/// use openlattice::core::{ExerciseStyle, OptionType};
/// use openlattice::instruments::VanillaOption;
///
/// let option = VanillaOption {
///     option_type: OptionType::Call,
///     strike: 100.0,
///     expiry: 1.0,
///     exercise: ExerciseStyle::European,
/// };
/// assert!(option.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
    /// Exercise style.
    pub exercise: ExerciseStyle,
}

impl VanillaOption {
    /// Builds a European call option.
    ///
    /// # Examples
    /// ```
    /// use openlattice::core::{ExerciseStyle, OptionType};
    /// use openlattice::instruments::VanillaOption;
    ///
    /// let call = VanillaOption::european_call(100.0, 1.0);
    /// assert_eq!(call.option_type, OptionType::Call);
    /// assert_eq!(call.exercise, ExerciseStyle::European);
    /// ```
    pub fn european_call(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
            expiry,
            exercise: ExerciseStyle::European,
        }
    }

    /// Builds a European put option.
    pub fn european_put(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            expiry,
            exercise: ExerciseStyle::European,
        }
    }

    /// Builds an American call option.
    pub fn american_call(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
            expiry,
            exercise: ExerciseStyle::American,
        }
    }

    /// Builds an American put option.
    ///
    /// # Examples
    /// ```
    /// use openlattice::core::ExerciseStyle;
    /// use openlattice::instruments::VanillaOption;
    ///
    /// let put = VanillaOption::american_put(100.0, 2.0);
    /// assert_eq!(put.exercise, ExerciseStyle::American);
    /// ```
    pub fn american_put(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            expiry,
            exercise: ExerciseStyle::American,
        }
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidArgument`] when:
    /// - `strike <= 0`
    /// - `expiry < 0`
    ///
    /// `expiry == 0` is accepted to support immediate-expiry intrinsic-value
    /// pricing.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PricingError::InvalidArgument(
                "vanilla strike must be > 0".to_string(),
            ));
        }
        if !self.expiry.is_finite() || self.expiry < 0.0 {
            return Err(PricingError::InvalidArgument(
                "vanilla expiry must be >= 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Instrument for VanillaOption {
    fn instrument_type(&self) -> &str {
        "VanillaOption"
    }
}
