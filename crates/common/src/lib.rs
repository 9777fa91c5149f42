//! Shared currency/price/quantity types, error definitions, and the decimal
//! lot-rounding and notional-check helpers used by the arbitrage detector.

/// Decimal helpers for lot-size rounding and notional-minimum checks.
pub mod decimal;
/// Common error types for the analysis pipeline.
pub mod errors;
/// Currency identifiers and decimal-precise price/quantity newtypes.
pub mod types;

pub use decimal::{check_notional_minimum, lot_size_for_exponent, round_down_to_lot};
pub use errors::AnalysisError;
pub use types::{Currency, CurrencyPair, Position, Price, Quantity};
