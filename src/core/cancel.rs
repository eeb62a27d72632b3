use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::PricingError;

/// Cooperative cancellation handle for long-running engines.
///
/// Lattice memory is O(N²) and Monte Carlo time is O(N·M), so callers pricing
/// large instances can hand a clone of this token to an engine and flip it
/// from another thread. Engines check the flag between lattice levels and
/// between simulated paths, surfacing [`PricingError::Cancelled`] when set.
///
/// # Examples
/// ```
/// use openlattice::core::CancelToken;
///
/// let token = CancelToken::new();
/// assert!(!token.is_cancelled());
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns `Err(PricingError::Cancelled)` once the token is set.
    pub fn check(&self) -> Result<(), PricingError> {
        if self.is_cancelled() {
            Err(PricingError::Cancelled)
        } else {
            Ok(())
        }
    }
}
