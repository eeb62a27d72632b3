//! Risk-neutral backward induction over a recombining lattice.
//!
//! Produces the root price together with full per-node value and delta
//! tables, which the hedge replay simulator consumes downstream. Valuation
//! is deterministic, side-effect free, and never mutates the lattice.

use std::collections::HashMap;

use crate::core::{
    CancelToken, ExerciseStyle, OptionType, PricingEngine, PricingError, PricingResult,
};
use crate::engines::tree::lattice::{Lattice, NodeKey};
use crate::instruments::VanillaOption;
use crate::market::Market;

/// Risk-neutral up-move probability `p = (e^(r dt) - d) / (u - d)`.
///
/// # Errors
/// - [`PricingError::NumericDomain`] when `u == d` (the delta ratio and `p`
///   itself divide by zero on a degenerate lattice).
/// - [`PricingError::InvalidMarketParameters`] when the growth factor
///   `e^(r dt)` leaves the no-arbitrage band `[d, u]`, i.e. `p` falls
///   outside `[0, 1]`.
pub fn risk_neutral_probability(
    rate: f64,
    dt: f64,
    up: f64,
    down: f64,
) -> Result<f64, PricingError> {
    if up == down {
        return Err(PricingError::NumericDomain(
            "up and down factors coincide".to_string(),
        ));
    }

    let growth = (rate * dt).exp();
    let p = (growth - down) / (up - down);
    if !(down <= growth && growth <= up) || !p.is_finite() {
        return Err(PricingError::InvalidMarketParameters(
            "risk-neutral probability is outside [0, 1]".to_string(),
        ));
    }

    Ok(p)
}

/// Per-step discount factor `e^(-r dt)`.
#[inline]
pub fn discount_factor(rate: f64, dt: f64) -> f64 {
    (-rate * dt).exp()
}

/// Backward-induction output: root price plus per-node value and delta
/// tables keyed by [`NodeKey`].
///
/// Deltas exist at levels `0..N-1` only; the terminal level has no children
/// to difference.
#[derive(Debug, Clone)]
pub struct TreeValuation {
    price: f64,
    values: HashMap<NodeKey, f64>,
    deltas: HashMap<NodeKey, f64>,
}

impl TreeValuation {
    /// Option price at the root node.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Option value at a node, if the node exists in the table.
    #[inline]
    pub fn value(&self, key: NodeKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Replication delta at a node; `None` at the terminal level.
    #[inline]
    pub fn delta(&self, key: NodeKey) -> Option<f64> {
        self.deltas.get(&key).copied()
    }

    /// Full value table.
    #[inline]
    pub fn values(&self) -> &HashMap<NodeKey, f64> {
        &self.values
    }

    /// Full delta table.
    #[inline]
    pub fn deltas(&self) -> &HashMap<NodeKey, f64> {
        &self.deltas
    }
}

/// Value at a node given its continuation value, dispatched over the two
/// closed contract enumerations. European keeps the continuation; American
/// floors it at the immediate intrinsic payoff.
#[inline]
fn induced_value(
    style: ExerciseStyle,
    option_type: OptionType,
    continuation: f64,
    spot: f64,
    strike: f64,
) -> f64 {
    match (style, option_type) {
        (ExerciseStyle::European, OptionType::Call) => continuation,
        (ExerciseStyle::European, OptionType::Put) => continuation,
        (ExerciseStyle::American, OptionType::Call) => {
            continuation.max(OptionType::Call.payoff(spot, strike))
        }
        (ExerciseStyle::American, OptionType::Put) => {
            continuation.max(OptionType::Put.payoff(spot, strike))
        }
    }
}

fn induce(
    lattice: &Lattice,
    option: &VanillaOption,
    rate: f64,
    cancel: Option<&CancelToken>,
) -> Result<TreeValuation, PricingError> {
    option.validate()?;

    let steps = lattice.steps();
    let node_count = (steps + 1) * (steps + 2) / 2;
    let mut values = HashMap::with_capacity(node_count);

    if steps == 0 {
        // Immediate-expiry collapse: the root is the terminal level.
        let price = option.option_type.payoff(lattice.spot(), option.strike);
        values.insert(NodeKey::root(), price);
        return Ok(TreeValuation {
            price,
            values,
            deltas: HashMap::new(),
        });
    }

    let dt = option.expiry / steps as f64;
    let p = risk_neutral_probability(rate, dt, lattice.up(), lattice.down())?;
    let discount = discount_factor(rate, dt);

    for &node in lattice.terminal() {
        let payoff = option
            .option_type
            .payoff(lattice.node_price(node), option.strike);
        values.insert(node, payoff);
    }

    let mut deltas = HashMap::with_capacity(node_count - (steps + 1));
    for t in (0..steps).rev() {
        if let Some(token) = cancel {
            token.check()?;
        }
        for &node in lattice.level(t) {
            let up_key = node.up_child();
            let down_key = node.down_child();
            let v_up = values[&up_key];
            let v_down = values[&down_key];

            let continuation = discount * (p * v_up + (1.0 - p) * v_down);
            let value = induced_value(
                option.exercise,
                option.option_type,
                continuation,
                lattice.node_price(node),
                option.strike,
            );
            values.insert(node, value);

            let s_up = lattice.node_price(up_key);
            let s_down = lattice.node_price(down_key);
            deltas.insert(node, (v_up - v_down) / (s_up - s_down));
        }
    }

    let price = values[&NodeKey::root()];
    Ok(TreeValuation {
        price,
        values,
        deltas,
    })
}

/// Prices a vanilla option on the given lattice by backward induction.
///
/// Returns the root price plus full value/delta tables for reuse by the
/// hedge replay simulator.
///
/// # Errors
/// Propagates instrument validation failures and the market-parameter checks
/// of [`risk_neutral_probability`].
///
/// # Examples
/// ```
/// use openlattice::engines::tree::{Lattice, value_option};
/// use openlattice::instruments::VanillaOption;
///
/// let lattice = Lattice::build(100.0, 1.2, 0.8, 2).unwrap();
/// let option = VanillaOption::european_call(90.0, 2.0);
/// let valuation = value_option(&lattice, &option, 0.0).unwrap();
/// assert!((valuation.price() - 16.5).abs() < 1e-9);
/// ```
pub fn value_option(
    lattice: &Lattice,
    option: &VanillaOption,
    rate: f64,
) -> Result<TreeValuation, PricingError> {
    induce(lattice, option, rate, None)
}

/// Binomial tree engine with explicit move factors.
#[derive(Debug, Clone)]
pub struct BinomialTreeEngine {
    /// Up move factor, > 1.
    pub up: f64,
    /// Down move factor, in (0, 1).
    pub down: f64,
    /// Number of tree steps.
    pub steps: usize,
    cancel: Option<CancelToken>,
}

impl BinomialTreeEngine {
    /// Creates a tree engine with the given factors and step count.
    pub fn new(up: f64, down: f64, steps: usize) -> Self {
        Self {
            up,
            down,
            steps,
            cancel: None,
        }
    }

    /// Installs a cooperative cancellation token, checked once per level.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Builds the lattice from the market spot and runs backward induction,
    /// returning the full valuation tables.
    pub fn valuate(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<TreeValuation, PricingError> {
        let lattice = Lattice::build(market.spot, self.up, self.down, self.steps)?;
        induce(&lattice, instrument, market.rate, self.cancel.as_ref())
    }
}

impl PricingEngine<VanillaOption> for BinomialTreeEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        let valuation = self.valuate(instrument, market)?;

        let mut diagnostics = HashMap::new();
        diagnostics.insert("num_steps".to_string(), self.steps as f64);
        if self.steps > 0 {
            let dt = instrument.expiry / self.steps as f64;
            let p = risk_neutral_probability(market.rate, dt, self.up, self.down)?;
            diagnostics.insert("risk_neutral_prob".to_string(), p);
            diagnostics.insert("discount_factor".to_string(), discount_factor(market.rate, dt));
        }

        Ok(PricingResult {
            price: valuation.price(),
            stderr: None,
            delta: valuation.delta(NodeKey::root()),
            diagnostics,
        })
    }
}
