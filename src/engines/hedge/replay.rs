//! Cash-ledger simulation of delta-hedging a written option.
//!
//! The simulator replays one realized path through a valued lattice and
//! records every cash flow the writer's hedge produces: the premium received
//! at inception, each share rebalance, and the counterparty's exercise at
//! maturity. The interest-accruing cash account makes the replication
//! self-financing check observable step by step.
//!
//! Exercise policy: exercise is evaluated at maturity only and settles in
//! cash from the writer's side. A written put debits the full strike when the
//! terminal price is below it; a written call debits the intrinsic when the
//! terminal price is above it. No share leg accompanies exercise, and early
//! exercise is never triggered mid-replay, even for American-priced tables.

use serde::{Deserialize, Serialize};

use crate::core::{OptionType, PricingError};
use crate::engines::tree::{Lattice, NodeKey, TreeValuation};
use crate::instruments::VanillaOption;

/// One binary lattice move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Price multiplies by the up factor.
    Up,
    /// Price multiplies by the down factor.
    Down,
}

impl Move {
    /// Successor node key after taking this move.
    #[inline]
    pub fn apply(self, key: NodeKey) -> NodeKey {
        match self {
            Self::Up => key.up_child(),
            Self::Down => key.down_child(),
        }
    }
}

/// A concrete realized path of lattice moves, walked from the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path(Vec<Move>);

impl Path {
    /// Wraps an already-typed move sequence.
    pub fn new(moves: Vec<Move>) -> Self {
        Self(moves)
    }

    /// Parses the raw binary encoding: `0` is an up move, `1` is a down
    /// move.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidArgument`] for any other value.
    pub fn from_indices(indices: &[u8]) -> Result<Self, PricingError> {
        indices
            .iter()
            .map(|&index| match index {
                0 => Ok(Move::Up),
                1 => Ok(Move::Down),
                other => Err(PricingError::InvalidArgument(format!(
                    "path moves must be 0 (up) or 1 (down), got {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// A path of `n` consecutive up moves.
    pub fn all_up(n: usize) -> Self {
        Self(vec![Move::Up; n])
    }

    /// A path of `n` consecutive down moves.
    pub fn all_down(n: usize) -> Self {
        Self(vec![Move::Down; n])
    }

    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no moves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The move sequence.
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.0
    }
}

/// Category of a hedge ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashFlowKind {
    /// Premium received for writing the option at inception.
    WriteOption,
    /// Proceeds from selling shares while rebalancing.
    ShortShares,
    /// Cost of buying shares while rebalancing.
    LongShares,
    /// Counterparty exercise against the writer at maturity.
    Exercise,
}

impl CashFlowKind {
    /// Whether this entry credits the writer's cash account.
    #[inline]
    pub fn is_credit(self) -> bool {
        matches!(self, Self::WriteOption | Self::ShortShares)
    }
}

/// One entry of the hedge ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Entry category.
    pub kind: CashFlowKind,
    /// Unsigned cash amount.
    pub usd_amount: f64,
    /// Unsigned share quantity moved, zero for premium and exercise entries.
    pub share_amount: f64,
}

impl CashFlow {
    /// Cash impact on the writer's account: credits positive, debits
    /// negative.
    #[inline]
    pub fn signed_usd(&self) -> f64 {
        if self.kind.is_credit() {
            self.usd_amount
        } else {
            -self.usd_amount
        }
    }
}

/// One time step of the replay table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeRow {
    /// Time step index, 0 at inception.
    pub time: usize,
    /// Underlying price at the walked node.
    pub stock_price: f64,
    /// Option value at the walked node.
    pub option_value: f64,
    /// Delta held from this step to the next; `None` at maturity.
    pub delta: Option<f64>,
    /// Account balance after accrual and this step's cash flows.
    pub cash_account: f64,
}

/// Full output of a hedge replay: per-time rows plus the cash-flow ledger
/// grouped by time step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeReport {
    /// One row per time step, inception through maturity.
    pub rows: Vec<HedgeRow>,
    /// Cash flows indexed by time step.
    pub ledger: Vec<Vec<CashFlow>>,
}

impl HedgeReport {
    /// Cash flows booked at time step `t`.
    #[inline]
    pub fn flows_at(&self, t: usize) -> &[CashFlow] {
        &self.ledger[t]
    }

    /// Account balance at maturity.
    #[inline]
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|row| row.cash_account).unwrap_or(0.0)
    }
}

/// Replays a delta hedge of the written `option` along `path`.
///
/// The walk starts at the root. At inception a [`CashFlowKind::WriteOption`]
/// entry credits the option's root value. At each step before maturity the
/// rebalance `diff = delta[t] - delta[t-1]` (with `delta[-1] = 0`: the
/// writer starts unhedged, so the first rebalance coincides with writing the
/// option) books [`CashFlowKind::ShortShares`] proceeds for `diff < 0` or a
/// [`CashFlowKind::LongShares`] cost for `diff > 0`, both at `|diff|` times
/// the current stock price. Maturity exercise follows the module-level
/// policy. The cash account accrues at `e^(r dt)` per step before that
/// step's flows are applied.
///
/// # Errors
/// - [`PricingError::InvalidArgument`] when the path length differs from the
///   lattice step count, or the valuation tables lack a walked node.
///
/// # Examples
/// ```
/// use openlattice::engines::hedge::{Path, simulate_hedge};
/// use openlattice::engines::tree::{Lattice, value_option};
/// use openlattice::instruments::VanillaOption;
///
/// let lattice = Lattice::build(100.0, 1.2, 0.8, 2).unwrap();
/// let put = VanillaOption::european_put(90.0, 2.0);
/// let valuation = value_option(&lattice, &put, 0.0).unwrap();
///
/// let report = simulate_hedge(&lattice, &valuation, &put, 0.0, &Path::all_down(2)).unwrap();
/// assert_eq!(report.rows.len(), 3);
/// // Terminal price 64 < 90: the counterparty exercises for the strike.
/// assert_eq!(report.flows_at(2)[0].usd_amount, 90.0);
/// ```
pub fn simulate_hedge(
    lattice: &Lattice,
    valuation: &TreeValuation,
    option: &VanillaOption,
    rate: f64,
    path: &Path,
) -> Result<HedgeReport, PricingError> {
    option.validate()?;

    let steps = lattice.steps();
    if path.len() != steps {
        return Err(PricingError::InvalidArgument(format!(
            "hedge path has {} moves but the lattice has {} steps",
            path.len(),
            steps
        )));
    }

    let mut node_keys = Vec::with_capacity(steps + 1);
    let mut key = NodeKey::root();
    node_keys.push(key);
    for step in path.moves() {
        key = step.apply(key);
        node_keys.push(key);
    }

    let mut ledger: Vec<Vec<CashFlow>> = vec![Vec::new(); steps + 1];
    ledger[0].push(CashFlow {
        kind: CashFlowKind::WriteOption,
        usd_amount: valuation.price(),
        share_amount: 0.0,
    });

    let mut prev_delta = 0.0;
    for (t, &node) in node_keys.iter().take(steps).enumerate() {
        let delta = valuation.delta(node).ok_or_else(|| {
            PricingError::InvalidArgument(format!(
                "delta table has no entry for the walked node at step {t}"
            ))
        })?;
        let diff = delta - prev_delta;
        if diff != 0.0 {
            let kind = if diff < 0.0 {
                CashFlowKind::ShortShares
            } else {
                CashFlowKind::LongShares
            };
            ledger[t].push(CashFlow {
                kind,
                usd_amount: diff.abs() * lattice.node_price(node),
                share_amount: diff.abs(),
            });
        }
        prev_delta = delta;
    }

    let terminal_price = lattice.node_price(node_keys[steps]);
    let exercise_amount = match option.option_type {
        OptionType::Put if terminal_price < option.strike => Some(option.strike),
        OptionType::Call if terminal_price > option.strike => {
            Some(terminal_price - option.strike)
        }
        _ => None,
    };
    if let Some(usd_amount) = exercise_amount {
        ledger[steps].push(CashFlow {
            kind: CashFlowKind::Exercise,
            usd_amount,
            share_amount: 0.0,
        });
    }

    let dt = if steps > 0 {
        option.expiry / steps as f64
    } else {
        0.0
    };
    let growth = (rate * dt).exp();

    let mut balance = 0.0;
    let mut rows = Vec::with_capacity(steps + 1);
    for (t, &node) in node_keys.iter().enumerate() {
        balance *= growth;
        for flow in &ledger[t] {
            balance += flow.signed_usd();
        }

        let option_value = valuation.value(node).ok_or_else(|| {
            PricingError::InvalidArgument(format!(
                "value table has no entry for the walked node at step {t}"
            ))
        })?;
        rows.push(HedgeRow {
            time: t,
            stock_price: lattice.node_price(node),
            option_value,
            delta: if t < steps { valuation.delta(node) } else { None },
            cash_account: balance,
        });
    }

    Ok(HedgeReport { rows, ledger })
}
