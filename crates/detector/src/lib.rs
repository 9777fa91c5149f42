//! # Arbitrage Detector Crate
//!
//! Detects cyclic arbitrage across currencies on a spot exchange, from a
//! snapshot of top-of-book quotes, through to a maximal executable order
//! sequence: build a `-ln(rate)` graph, partition it into strongly
//! connected components, search each component for a negative cycle, then
//! size and report the first one found.

pub mod bellman_ford;
pub mod collector;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod scc;
pub mod sizing;

pub use pipeline::analyze;
pub use report::Report;
