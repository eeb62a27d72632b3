//! Delta-hedge replay along one realized lattice path.

pub mod replay;

pub use replay::{
    CashFlow, CashFlowKind, HedgeReport, HedgeRow, Move, Path, simulate_hedge,
};
