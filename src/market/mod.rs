//! Market snapshot consumed by the pricing engines.
//!
//! The lattice model takes its up/down move factors as explicit primitives,
//! so a snapshot carries only the observable state: spot level and the
//! continuously compounded risk-free rate.

use crate::core::PricingError;

/// Market snapshot used by all pricing engines.
///
/// # Examples
/// ```
/// use openlattice::market::Market;
///
/// let market = Market::builder().spot(100.0).rate(0.05).build().unwrap();
/// assert_eq!(market.spot, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Market {
    /// Spot price.
    pub spot: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
}

impl Market {
    /// Starts a market builder.
    #[inline]
    pub fn builder() -> MarketBuilder {
        MarketBuilder::default()
    }
}

/// Builder for [`Market`].
#[derive(Debug, Clone, Default)]
pub struct MarketBuilder {
    spot: Option<f64>,
    rate: Option<f64>,
}

impl MarketBuilder {
    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the flat risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Validates and builds a [`Market`].
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidArgument`] when the spot is missing,
    /// non-positive, or non-finite. The rate defaults to zero.
    pub fn build(self) -> Result<Market, PricingError> {
        let spot = self
            .spot
            .ok_or_else(|| PricingError::InvalidArgument("market spot is required".to_string()))?;
        if !spot.is_finite() || spot <= 0.0 {
            return Err(PricingError::InvalidArgument(
                "market spot must be > 0".to_string(),
            ));
        }

        let rate = self.rate.unwrap_or(0.0);
        if !rate.is_finite() {
            return Err(PricingError::InvalidArgument(
                "market rate must be finite".to_string(),
            ));
        }

        Ok(Market { spot, rate })
    }
}
