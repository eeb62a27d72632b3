//! Recombining price lattice keyed by exact move counts.
//!
//! Node identity is the integer pair (up moves, down moves), never the
//! floating-point price: two parents reaching the same pair must land on the
//! same node, and integer identity guarantees that regardless of float
//! rounding. The price itself is a pure function of the key,
//! `S0 * u^up_count * d^down_count`.

use std::collections::BTreeSet;

use crate::core::PricingError;

/// Identity of a lattice node: the number of up and down moves taken from
/// the root.
///
/// For a node at level `t`, `up_count + down_count == t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey {
    /// Number of up moves from the root.
    pub up_count: u32,
    /// Number of down moves from the root.
    pub down_count: u32,
}

impl NodeKey {
    /// The level-0 node.
    #[inline]
    pub fn root() -> Self {
        Self {
            up_count: 0,
            down_count: 0,
        }
    }

    /// Lattice level this key lives on.
    #[inline]
    pub fn level(self) -> u32 {
        self.up_count + self.down_count
    }

    /// Successor after one up move.
    #[inline]
    pub fn up_child(self) -> Self {
        Self {
            up_count: self.up_count + 1,
            down_count: self.down_count,
        }
    }

    /// Successor after one down move.
    #[inline]
    pub fn down_child(self) -> Self {
        Self {
            up_count: self.up_count,
            down_count: self.down_count + 1,
        }
    }
}

/// Recombining binomial price lattice.
///
/// Level `t` holds exactly `t + 1` distinct nodes. The structure is immutable
/// after construction.
///
/// # Examples
/// ```
/// use openlattice::engines::tree::Lattice;
///
/// let lattice = Lattice::build(100.0, 1.2, 0.8, 2).unwrap();
/// assert_eq!(lattice.steps(), 2);
/// assert_eq!(lattice.level(2).len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Lattice {
    spot: f64,
    up: f64,
    down: f64,
    levels: Vec<Vec<NodeKey>>,
}

impl Lattice {
    /// Builds the lattice by inserting each parent's up/down children into
    /// the next level, deduplicated by key.
    ///
    /// `steps == 0` yields the single-node lattice. O(N²) nodes overall.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidArgument`] unless `spot > 0`,
    /// `up > 1`, and `0 < down < 1`.
    pub fn build(spot: f64, up: f64, down: f64, steps: usize) -> Result<Self, PricingError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(PricingError::InvalidArgument(
                "lattice spot must be > 0".to_string(),
            ));
        }
        if !up.is_finite() || up <= 1.0 {
            return Err(PricingError::InvalidArgument(
                "lattice up factor must be > 1".to_string(),
            ));
        }
        if !down.is_finite() || down <= 0.0 || down >= 1.0 {
            return Err(PricingError::InvalidArgument(
                "lattice down factor must lie in (0, 1)".to_string(),
            ));
        }

        let mut levels = Vec::with_capacity(steps + 1);
        levels.push(vec![NodeKey::root()]);

        for _ in 0..steps {
            let mut next = BTreeSet::new();
            for node in levels.last().map(Vec::as_slice).unwrap_or_default() {
                next.insert(node.up_child());
                next.insert(node.down_child());
            }
            levels.push(next.into_iter().collect());
        }

        Ok(Self {
            spot,
            up,
            down,
            levels,
        })
    }

    /// Initial price at the root.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Up move factor.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down move factor.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Number of time steps; the lattice has `steps() + 1` levels.
    #[inline]
    pub fn steps(&self) -> usize {
        self.levels.len() - 1
    }

    /// All levels, root first.
    #[inline]
    pub fn levels(&self) -> &[Vec<NodeKey>] {
        &self.levels
    }

    /// Nodes at level `t`, ordered by ascending down count.
    #[inline]
    pub fn level(&self, t: usize) -> &[NodeKey] {
        &self.levels[t]
    }

    /// Nodes at the terminal level.
    #[inline]
    pub fn terminal(&self) -> &[NodeKey] {
        self.levels
            .last()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Underlying price at a node, derived purely from its key.
    #[inline]
    pub fn node_price(&self, key: NodeKey) -> f64 {
        self.spot * self.up.powi(key.up_count as i32) * self.down.powi(key.down_count as i32)
    }
}
