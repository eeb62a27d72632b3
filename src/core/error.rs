/// Engine and model errors surfaced by the API.
///
/// All validation is eager: each operation checks its inputs before any
/// computation proceeds, and never clamps probabilities or prices silently.
/// Failures are local to the call that raised them; nothing retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Input validation error (bad instrument fields, malformed path,
    /// zero simulation count, missing table entry).
    InvalidArgument(String),
    /// The risk-neutral probability implied by `r`, `dt`, `u`, `d` falls
    /// outside `[0, 1]`, violating the no-arbitrage bound `d < e^(r dt) < u`.
    InvalidMarketParameters(String),
    /// Degenerate numerical configuration, such as coinciding up/down
    /// factors that divide by zero in the delta ratio.
    NumericDomain(String),
    /// A cooperative cancellation signal was observed mid-computation.
    Cancelled,
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::InvalidMarketParameters(msg) => {
                write!(f, "invalid market parameters: {msg}")
            }
            Self::NumericDomain(msg) => write!(f, "numeric domain error: {msg}"),
            Self::Cancelled => write!(f, "computation cancelled"),
        }
    }
}

impl std::error::Error for PricingError {}
