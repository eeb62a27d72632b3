//! Instrument definitions.

pub mod asian;
pub mod vanilla;

pub use asian::AsianOption;
pub use vanilla::VanillaOption;
