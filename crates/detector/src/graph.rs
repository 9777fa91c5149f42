//! Builds the `-ln(rate)` exchange-rate graph from order-book snapshots.
//!
//! Candidate pairs are probed first (cheap existence checks), then every
//! listed pair's order book is fetched concurrently, and only once every
//! fetch has returned is the dense weight matrix assembled. This mirrors the
//! two-phase "gather, then build" structure of the original graph
//! constructor, which fetches order books "almost simultaneously" before
//! doing any matrix arithmetic.

use std::collections::HashMap;

use arb_common::{AnalysisError, Currency};
use exchange_client::{ExchangeClient, OrderBookTop};
use futures::future::try_join_all;

/// A built exchange-rate graph: a dense weight matrix plus the order-book
/// snapshot that produced each listed edge.
pub struct PriceGraph {
    pub nodes: Vec<Currency>,
    pub node_index: HashMap<Currency, usize>,
    /// `matrix[i][j] == 0.0` means no edge `i -> j` (besides the diagonal,
    /// which is always `0.0` by construction).
    pub matrix: Vec<Vec<f64>>,
    /// Order-book top for every listed `(base, quote)` pair, keyed by
    /// `(base_index, quote_index)`.
    pub order_books: HashMap<(usize, usize), OrderBookTop>,
}

impl PriceGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `(base_index, quote_index)` was a listed pair (i.e. the order
    /// book for it was actually fetched), as opposed to merely having a
    /// nonzero matrix entry via the reciprocal edge.
    pub fn is_listed(&self, base_index: usize, quote_index: usize) -> bool {
        self.order_books.contains_key(&(base_index, quote_index))
    }
}

/// Enumerates candidate pairs and assembles the weight matrix.
pub struct GraphBuilder<'a, C: ExchangeClient> {
    client: &'a C,
}

impl<'a, C: ExchangeClient> GraphBuilder<'a, C> {
    pub fn new(client: &'a C) -> Self {
        GraphBuilder { client }
    }

    /// Builds the graph for `currencies`. Aborts with `MissingCurrencies` if
    /// any symbol is not listed, or `Transport` on any exchange-call failure.
    pub async fn build(&self, currencies: &[Currency]) -> Result<PriceGraph, AnalysisError> {
        let missing = self
            .client
            .check_currencies_exist(currencies)
            .await
            .map_err(AnalysisError::Transport)?;
        if !missing.is_empty() {
            return Err(AnalysisError::MissingCurrencies(missing));
        }

        let node_index: HashMap<Currency, usize> = currencies
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        let listed_pairs = self.enumerate_listed_pairs(currencies).await?;

        // Gather every order book concurrently before building anything, so
        // that all snapshots are retrieved at (almost) the same instant.
        let fetches = listed_pairs.iter().map(|(base, quote)| async move {
            let top = self
                .client
                .order_book_top(base, quote)
                .await
                .map_err(AnalysisError::Transport)?;
            Ok::<_, AnalysisError>((base.clone(), quote.clone(), top))
        });
        let snapshots = try_join_all(fetches).await?;

        let n = currencies.len();
        let mut matrix = vec![vec![0.0_f64; n]; n];
        let mut order_books = HashMap::with_capacity(snapshots.len());

        for (base, quote, top) in snapshots {
            let base_idx = node_index[&base];
            let quote_idx = node_index[&quote];

            let bid = top.bid_price.0.to_f64_lossless();
            let ask = top.ask_price.0.to_f64_lossless();

            matrix[base_idx][quote_idx] = -bid.ln();
            matrix[quote_idx][base_idx] = ask.ln();

            order_books.insert((base_idx, quote_idx), top);
        }

        Ok(PriceGraph {
            nodes: currencies.to_vec(),
            node_index,
            matrix,
            order_books,
        })
    }

    async fn enumerate_listed_pairs(
        &self,
        currencies: &[Currency],
    ) -> Result<Vec<(Currency, Currency)>, AnalysisError> {
        let mut pairs = Vec::new();
        for base in currencies {
            for quote in currencies {
                if base == quote {
                    continue;
                }
                let exists = self
                    .client
                    .check_pair_exists(base, quote)
                    .await
                    .map_err(AnalysisError::Transport)?;
                if exists {
                    pairs.push((base.clone(), quote.clone()));
                }
            }
        }
        Ok(pairs)
    }
}

trait ToF64Lossless {
    fn to_f64_lossless(&self) -> f64;
}

impl ToF64Lossless for rust_decimal::Decimal {
    fn to_f64_lossless(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        self.to_f64().expect("decimal price fits in f64")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use exchange_client::PairMetadata;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct StubClient {
        pairs: HashSet<(&'static str, &'static str)>,
        books: HashMap<(&'static str, &'static str), OrderBookTop>,
        existing: HashSet<&'static str>,
        closed: Mutex<bool>,
    }

    #[async_trait]
    impl ExchangeClient for StubClient {
        async fn check_currencies_exist(&self, symbols: &[Currency]) -> anyhow::Result<Vec<Currency>> {
            Ok(symbols
                .iter()
                .filter(|c| !self.existing.contains(c.as_str()))
                .cloned()
                .collect())
        }

        async fn check_pair_exists(&self, base: &Currency, quote: &Currency) -> anyhow::Result<bool> {
            Ok(self.pairs.contains(&(base.as_str(), quote.as_str())))
        }

        async fn order_book_top(&self, base: &Currency, quote: &Currency) -> anyhow::Result<OrderBookTop> {
            Ok(self.books[&(base.as_str(), quote.as_str())])
        }

        async fn pair_metadata(&self, _base: &Currency, _quote: &Currency) -> anyhow::Result<PairMetadata> {
            unimplemented!("not exercised by graph-builder tests")
        }

        async fn close(&self) -> anyhow::Result<()> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    fn top(bid: rust_decimal::Decimal, ask: rust_decimal::Decimal) -> OrderBookTop {
        OrderBookTop {
            bid_price: arb_common::Price(bid),
            bid_size: arb_common::Quantity(dec!(1)),
            ask_price: arb_common::Price(ask),
            ask_size: arb_common::Quantity(dec!(1)),
        }
    }

    #[tokio::test]
    async fn builds_diagonal_zero_matrix_with_edges_only_for_listed_pairs() {
        let mut books = HashMap::new();
        books.insert(("BOBA", "USDT"), top(dec!(0.5), dec!(0.51)));
        books.insert(("ETH", "BTC"), top(dec!(0.06), dec!(0.061)));

        let client = StubClient {
            pairs: [("BOBA", "USDT"), ("ETH", "BTC")].into_iter().collect(),
            books,
            existing: ["BTC", "BOBA", "ETH", "USDT"].into_iter().collect(),
            closed: Mutex::new(false),
        };

        let currencies: Vec<Currency> = ["BTC", "BOBA", "ETH", "USDT"]
            .into_iter()
            .map(Currency::from)
            .collect();

        let graph = GraphBuilder::new(&client).build(&currencies).await.unwrap();

        for i in 0..graph.len() {
            assert_eq!(graph.matrix[i][i], 0.0);
        }
        assert_eq!(graph.matrix[0][2], 0.0); // BTC -> ETH not listed
        assert!((graph.matrix[1][3] - (-0.5_f64.ln())).abs() < 1e-9); // BOBA -> USDT = -ln(bid)
        assert!((graph.matrix[3][1] - 0.51_f64.ln()).abs() < 1e-9); // USDT -> BOBA = ln(ask)
    }

    #[tokio::test]
    async fn aborts_with_missing_currencies() {
        let client = StubClient {
            pairs: HashSet::new(),
            books: HashMap::new(),
            existing: ["BTC"].into_iter().collect(),
            closed: Mutex::new(false),
        };
        let currencies = vec![Currency::from("BTC"), Currency::from("ZZZ")];
        let err = GraphBuilder::new(&client).build(&currencies).await.unwrap_err();
        match err {
            AnalysisError::MissingCurrencies(missing) => {
                assert_eq!(missing, vec![Currency::from("ZZZ")]);
            }
            other => panic!("expected MissingCurrencies, got {other:?}"),
        }
    }
}
