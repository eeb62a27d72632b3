//! Monte Carlo pricer for fixed-strike arithmetic-average options on
//! binomial paths.
//!
//! Paths are simulated under the risk-neutral measure: each step moves up
//! with the same probability `p` the lattice valuator uses, so the mean
//! discounted payoff is an unbiased price estimate. Every path owns an
//! independent RNG stream derived from the base seed, which keeps the
//! estimate independent of how paths are partitioned across workers.
//! Sampling variance is reported as a standard error, never as a failure.

use std::collections::HashMap;

use crate::core::{
    CancelToken, OptionType, PricingEngine, PricingError, PricingResult,
};
use crate::engines::tree::risk_neutral_probability;
use crate::instruments::AsianOption;
use crate::market::Market;
use crate::math::rng::{RngKind, UniformRng, stream_seed};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Monte Carlo engine for [`AsianOption`] on binomial up/down paths.
#[derive(Debug, Clone)]
pub struct AsianMcEngine {
    /// Up move factor.
    pub up: f64,
    /// Down move factor.
    pub down: f64,
    /// Number of time steps per path.
    pub steps: usize,
    /// Number of simulated paths.
    pub num_paths: usize,
    /// Base RNG seed; path `i` uses the derived stream seed.
    pub seed: u64,
    /// Backing uniform generator kind.
    pub rng_kind: RngKind,
    cancel: Option<CancelToken>,
}

impl AsianMcEngine {
    /// Creates an engine with explicit factors, path and step counts.
    pub fn new(up: f64, down: f64, steps: usize, num_paths: usize, seed: u64) -> Self {
        Self {
            up,
            down,
            steps,
            num_paths,
            seed,
            rng_kind: RngKind::default(),
            cancel: None,
        }
    }

    /// Selects the backing uniform generator.
    pub fn with_rng_kind(mut self, rng_kind: RngKind) -> Self {
        self.rng_kind = rng_kind;
        self
    }

    /// Installs a cooperative cancellation token, checked once per path.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Simulated payoff of path `i` before discounting.
    ///
    /// The running price sum includes the initial spot, so the arithmetic
    /// average spans `steps + 1` observations.
    fn path_payoff(&self, option: &AsianOption, market: &Market, p: f64, i: usize) -> f64 {
        let mut rng = UniformRng::from_seed(self.rng_kind, stream_seed(self.seed, i));
        let mut price = market.spot;
        let mut total = market.spot;
        for _ in 0..self.steps {
            if rng.next_f64() < p {
                price *= self.up;
            } else {
                price *= self.down;
            }
            total += price;
        }
        let average = total / (self.steps + 1) as f64;
        option.payoff_on_average(average)
    }

    /// Estimates the option price, returning `(mean, standard_error)`.
    ///
    /// The standard error uses the (M-1)-denominator unbiased variance
    /// estimator and is reported as `0` when `num_paths <= 1`.
    ///
    /// # Errors
    /// - [`PricingError::InvalidArgument`] for invalid instrument fields or
    ///   `num_paths == 0`.
    /// - [`PricingError::NumericDomain`] when `up == down`.
    /// - [`PricingError::InvalidMarketParameters`] when the risk-neutral
    ///   probability implied by the factors and rate leaves `[0, 1]`.
    pub fn estimate(
        &self,
        option: &AsianOption,
        market: &Market,
    ) -> Result<(f64, f64), PricingError> {
        option.validate()?;
        if self.num_paths == 0 {
            return Err(PricingError::InvalidArgument(
                "num_paths must be > 0".to_string(),
            ));
        }

        let discount = (-market.rate * option.expiry).exp();

        if self.steps == 0 {
            // Single observation: every path averages to the spot itself.
            return Ok((discount * option.payoff_on_average(market.spot), 0.0));
        }

        let dt = option.expiry / self.steps as f64;
        let p = risk_neutral_probability(market.rate, dt, self.up, self.down)?;

        let (sum, sum_sq) = self.accumulate(option, market, p)?;

        let n = self.num_paths as f64;
        let mean = sum / n;
        let stderr = if self.num_paths > 1 {
            let variance = ((sum_sq - sum * sum / n) / (n - 1.0)).max(0.0);
            (variance / n).sqrt()
        } else {
            0.0
        };

        Ok((discount * mean, discount * stderr))
    }

    #[cfg(feature = "parallel")]
    fn accumulate(
        &self,
        option: &AsianOption,
        market: &Market,
        p: f64,
    ) -> Result<(f64, f64), PricingError> {
        (0..self.num_paths)
            .into_par_iter()
            .try_fold(
                || (0.0_f64, 0.0_f64),
                |(sum, sum_sq), i| {
                    if let Some(token) = &self.cancel {
                        token.check()?;
                    }
                    let x = self.path_payoff(option, market, p, i);
                    Ok((sum + x, sum_sq + x * x))
                },
            )
            .try_reduce(|| (0.0, 0.0), |a, b| Ok((a.0 + b.0, a.1 + b.1)))
    }

    #[cfg(not(feature = "parallel"))]
    fn accumulate(
        &self,
        option: &AsianOption,
        market: &Market,
        p: f64,
    ) -> Result<(f64, f64), PricingError> {
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for i in 0..self.num_paths {
            if let Some(token) = &self.cancel {
                token.check()?;
            }
            let x = self.path_payoff(option, market, p, i);
            sum += x;
            sum_sq += x * x;
        }
        Ok((sum, sum_sq))
    }
}

impl PricingEngine<AsianOption> for AsianMcEngine {
    fn price(
        &self,
        instrument: &AsianOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        let (price, stderr) = self.estimate(instrument, market)?;

        let mut diagnostics = HashMap::new();
        diagnostics.insert("num_paths".to_string(), self.num_paths as f64);
        diagnostics.insert("num_steps".to_string(), self.steps as f64);
        if self.steps > 0 {
            let dt = instrument.expiry / self.steps as f64;
            let p = risk_neutral_probability(market.rate, dt, self.up, self.down)?;
            diagnostics.insert("risk_neutral_prob".to_string(), p);
        }

        Ok(PricingResult {
            price,
            stderr: Some(stderr),
            delta: None,
            diagnostics,
        })
    }
}

/// Prices a fixed-strike arithmetic-average option by Monte Carlo,
/// returning `(mean_price, standard_error)`.
///
/// # Examples
/// ```
/// use openlattice::core::OptionType;
/// use openlattice::engines::monte_carlo::price_asian_mc;
///
/// let (price, stderr) =
///     price_asian_mc(OptionType::Call, 100.0, 90.0, 2.0, 0.0, 1.2, 0.8, 2, 20_000, 42).unwrap();
/// assert!(price > 0.0 && stderr > 0.0);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn price_asian_mc(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    up: f64,
    down: f64,
    steps: usize,
    num_paths: usize,
    seed: u64,
) -> Result<(f64, f64), PricingError> {
    let market = Market::builder().spot(spot).rate(rate).build()?;
    let option = AsianOption::new(option_type, strike, expiry);
    AsianMcEngine::new(up, down, steps, num_paths, seed).estimate(&option, &market)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_market() -> Market {
        Market::builder().spot(100.0).rate(0.0).build().unwrap()
    }

    #[test]
    fn zero_paths_is_an_invalid_argument() {
        let option = AsianOption::new(OptionType::Call, 90.0, 2.0);
        let result = AsianMcEngine::new(1.2, 0.8, 2, 0, 42).estimate(&option, &reference_market());
        assert!(matches!(result, Err(PricingError::InvalidArgument(_))));
    }

    #[test]
    fn swapped_factors_fail_with_invalid_market_parameters() {
        // u = 0.8, d = 1.2 with r = 0.1 and dt = 1 violates the
        // no-arbitrage band.
        let result =
            price_asian_mc(OptionType::Call, 100.0, 90.0, 2.0, 0.1, 0.8, 1.2, 2, 100, 42);
        assert!(matches!(
            result,
            Err(PricingError::InvalidMarketParameters(_))
        ));
    }

    #[test]
    fn coinciding_factors_fail_with_numeric_domain() {
        let result =
            price_asian_mc(OptionType::Call, 100.0, 90.0, 2.0, 0.0, 1.0, 1.0, 2, 100, 42);
        assert!(matches!(result, Err(PricingError::NumericDomain(_))));
    }

    #[test]
    fn zero_steps_is_the_discounted_spot_payoff() {
        let option = AsianOption::new(OptionType::Call, 90.0, 2.0);
        let market = Market::builder().spot(100.0).rate(0.1).build().unwrap();
        let (price, stderr) = AsianMcEngine::new(1.2, 0.8, 0, 1000, 42)
            .estimate(&option, &market)
            .unwrap();
        assert_relative_eq!(price, (-0.2_f64).exp() * 10.0, epsilon = 1e-12);
        assert_eq!(stderr, 0.0);
    }

    #[test]
    fn single_path_reports_zero_standard_error() {
        let option = AsianOption::new(OptionType::Call, 90.0, 2.0);
        let (_, stderr) = AsianMcEngine::new(1.2, 0.8, 5, 1, 42)
            .estimate(&option, &reference_market())
            .unwrap();
        assert_eq!(stderr, 0.0);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn std_rng_kind_is_reproducible_too() {
        use crate::math::rng::RngKind;

        let option = AsianOption::new(OptionType::Call, 95.0, 1.0);
        let engine =
            AsianMcEngine::new(1.1, 0.9, 8, 2_000, 3).with_rng_kind(RngKind::StdRng);

        let a = engine.estimate(&option, &reference_market()).unwrap();
        let b = engine.estimate(&option, &reference_market()).unwrap();
        assert_eq!(a.0.to_bits(), b.0.to_bits());
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn equal_seeds_reproduce_the_estimate_exactly() {
        let option = AsianOption::new(OptionType::Put, 105.0, 1.0);
        let market = Market::builder().spot(100.0).rate(0.02).build().unwrap();
        let engine = AsianMcEngine::new(1.1, 0.9, 12, 5_000, 7);

        let a = engine.estimate(&option, &market).unwrap();
        let b = engine.estimate(&option, &market).unwrap();
        assert_eq!(a.0.to_bits(), b.0.to_bits());
        assert_eq!(a.1.to_bits(), b.1.to_bits());
    }

    #[test]
    fn cancellation_is_observed_between_paths() {
        let token = CancelToken::new();
        token.cancel();
        let option = AsianOption::new(OptionType::Call, 90.0, 2.0);
        let result = AsianMcEngine::new(1.2, 0.8, 10, 10_000, 42)
            .with_cancel(token)
            .estimate(&option, &reference_market());
        assert_eq!(result.unwrap_err(), PricingError::Cancelled);
    }

    #[test]
    fn engine_trait_reports_stderr_and_diagnostics() {
        let option = AsianOption::new(OptionType::Call, 90.0, 2.0);
        let result = AsianMcEngine::new(1.2, 0.8, 2, 10_000, 42)
            .price(&option, &reference_market())
            .unwrap();
        assert!(result.stderr.unwrap() > 0.0);
        assert_relative_eq!(result.diagnostics["risk_neutral_prob"], 0.5, epsilon = 1e-12);
        assert_eq!(result.diagnostics["num_paths"], 10_000.0);
    }
}
