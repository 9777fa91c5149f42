//! Wires graph construction, SCC partitioning, negative-cycle search, data
//! collection, and sizing into the single `analyze` entry point.
//!
//! Ported from `main_implementation.py::main`: build the graph, partition
//! by SCC, search each component in order for a negative cycle, stop at the
//! first one found, size it, and report. The exchange session is closed on
//! every exit path.

use arb_common::{AnalysisError, Currency};
use exchange_client::ExchangeClient;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::collector::collect_arbitrage_data;
use crate::graph::GraphBuilder;
use crate::report::{Report, ReportLeg};
use crate::scc;
use crate::sizing::size_cycle;

/// Runs the full detection pipeline against `client` for `currencies`,
/// using `traded_volume_usd` for fee-tier lookup.
///
/// The client's session is closed before returning, whether the pipeline
/// concludes normally or fails.
pub async fn analyze<C: ExchangeClient>(
    client: &C,
    currencies: &[Currency],
    traded_volume_usd: Decimal,
) -> Result<Report, AnalysisError> {
    let result = analyze_inner(client, currencies, traded_volume_usd).await;

    if let Err(close_err) = client.close().await {
        warn!(error = %close_err, "failed to close exchange session");
    }

    result
}

async fn analyze_inner<C: ExchangeClient>(
    client: &C,
    currencies: &[Currency],
    traded_volume_usd: Decimal,
) -> Result<Report, AnalysisError> {
    let graph = GraphBuilder::new(client).build(currencies).await?;

    let partition = scc::partition(&graph.matrix);
    if partition.components.is_empty() {
        info!("no strongly connected component of size >= 3");
        return Ok(Report::NoSccAvailable);
    }

    for component in &partition.components {
        let Some(local_cycle) = crate::bellman_ford::find_negative_cycle(&component.matrix) else {
            continue;
        };

        let cycle: Vec<usize> = local_cycle
            .iter()
            .map(|&local| component.sub_to_original[local])
            .collect();

        info!(?cycle, "negative cycle found");

        let legs = collect_arbitrage_data(client, &graph, &cycle, traded_volume_usd).await?;
        let sizing = size_cycle(&legs);

        let report_legs: Vec<ReportLeg> = legs
            .into_iter()
            .zip(sizing.adjusted_sizes.iter().copied())
            .map(|(leg, size)| ReportLeg { leg, size })
            .collect();

        if !sizing.notional_satisfied {
            return Ok(Report::NotionalViolated);
        }

        return if sizing.profit > Decimal::ZERO {
            Ok(Report::Profitable {
                legs: report_legs,
                profit: sizing.profit,
            })
        } else {
            Ok(Report::NotProfitable {
                legs: report_legs,
                profit: sizing.profit,
            })
        };
    }

    info!("strongly connected components exist but none yields a negative cycle");
    Ok(Report::NoNegativeCycle)
}
