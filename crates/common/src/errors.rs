use crate::types::Currency;
use thiserror::Error;

/// Errors that abort the analysis pipeline outright.
///
/// Everything else an analysis run can conclude (no SCC of interest, no
/// negative cycle, a notional violation, an unprofitable cycle) is a normal
/// outcome, not a failure — those are represented as `Report` values, not as
/// variants here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// One or more requested currencies are not listed on the exchange.
    #[error("currencies not found on exchange: {0:?}")]
    MissingCurrencies(Vec<Currency>),

    /// Any failure reaching the exchange: network, deserialization, or a
    /// non-success response. Boxed behind `anyhow` at the client boundary so
    /// transport-level detail (HTTP status, request id, underlying `io::Error`)
    /// survives without this crate depending on a specific HTTP stack.
    #[error("exchange transport error: {0}")]
    Transport(#[from] anyhow::Error),
}
