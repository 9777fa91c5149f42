//! Turns a witness cycle (vertex indices into a [`crate::graph::PriceGraph`])
//! into the per-leg data the sizer needs: which side of the book each leg
//! trades against, its price/quantity, fee, and lot/notional metadata.
//!
//! Ported from `ArbitrageDataCollector.extractArbitrageData`: whether a leg
//! is a short or a long is decided by membership of `(currency, next)` in
//! the set of listed pairs recorded while building the graph.

use arb_common::AnalysisError;
use exchange_client::ExchangeClient;
use rust_decimal::Decimal;

use crate::graph::PriceGraph;
use crate::sizing::Leg;

/// Collects a [`Leg`] for every edge of `cycle` (vertex indices into
/// `graph`), in cycle order.
pub async fn collect_arbitrage_data<C: ExchangeClient>(
    client: &C,
    graph: &PriceGraph,
    cycle: &[usize],
    traded_volume_usd: Decimal,
) -> Result<Vec<Leg>, AnalysisError> {
    let n = cycle.len();
    let mut legs = Vec::with_capacity(n);

    for index in 0..n {
        let current = cycle[index];
        let next = cycle[(index + 1) % n];

        let (base_idx, quote_idx, short) = if graph.is_listed(current, next) {
            (current, next, true)
        } else {
            debug_assert!(
                graph.is_listed(next, current),
                "cycle edge must be listed in one direction or the other"
            );
            (next, current, false)
        };

        let base = graph.nodes[base_idx].clone();
        let quote = graph.nodes[quote_idx].clone();
        let top = &graph.order_books[&(base_idx, quote_idx)];

        let metadata = client
            .pair_metadata(&base, &quote)
            .await
            .map_err(AnalysisError::Transport)?;
        let fee = client.fee_for_volume(traded_volume_usd);

        let (position, price, available_quantity) = if short {
            (arb_common::Position::Short, top.bid_price, top.bid_size)
        } else {
            (arb_common::Position::Long, top.ask_price, top.ask_size)
        };

        legs.push(Leg {
            pair: arb_common::CurrencyPair::new(base, quote),
            position,
            price,
            available_quantity,
            fee,
            base_lot_exponent: metadata.base_lot_exponent,
            notional_minimum: metadata.notional_minimum,
        });
    }

    Ok(legs)
}
