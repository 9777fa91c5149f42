//! An in-memory [`ExchangeClient`] carrying a small fixed snapshot, used by
//! the CLI's bundled demo when no real exchange integration is configured.

use std::collections::HashMap;

use arb_common::{Currency, Price, Quantity};
use async_trait::async_trait;
use exchange_client::{ExchangeClient, OrderBookTop, PairMetadata};
use rust_decimal_macros::dec;

pub struct MockExchangeClient {
    known: Vec<Currency>,
    books: HashMap<(String, String), OrderBookTop>,
    metadata: HashMap<(String, String), PairMetadata>,
}

impl MockExchangeClient {
    /// A small fixed snapshot across BTC, ETH and USDT with a mild
    /// triangular mispricing baked in, so the bundled demo has something to
    /// report without hitting a real exchange.
    pub fn demo() -> Self {
        let mut client = MockExchangeClient {
            known: vec![Currency::from("BTC"), Currency::from("ETH"), Currency::from("USDT")],
            books: HashMap::new(),
            metadata: HashMap::new(),
        };

        client.insert_pair("BTC", "USDT", dec!(20000), dec!(2), dec!(20010), dec!(2), -8, dec!(1));
        client.insert_pair("ETH", "USDT", dec!(1000), dec!(20), dec!(1001), dec!(20), -8, dec!(1));
        client.insert_pair(
            "ETH",
            "BTC",
            dec!(0.0525),
            dec!(10),
            dec!(0.0526),
            dec!(10),
            -8,
            dec!(0.0001),
        );

        client
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_pair(
        &mut self,
        base: &str,
        quote: &str,
        bid: rust_decimal::Decimal,
        bid_size: rust_decimal::Decimal,
        ask: rust_decimal::Decimal,
        ask_size: rust_decimal::Decimal,
        lot_exponent: i32,
        notional_minimum: rust_decimal::Decimal,
    ) {
        let key = (base.to_string(), quote.to_string());
        self.books.insert(
            key.clone(),
            OrderBookTop {
                bid_price: Price(bid),
                bid_size: Quantity(bid_size),
                ask_price: Price(ask),
                ask_size: Quantity(ask_size),
            },
        );
        self.metadata.insert(
            key,
            PairMetadata {
                base_lot_exponent: lot_exponent,
                notional_minimum: Price(notional_minimum),
            },
        );
    }
}

#[async_trait]
impl ExchangeClient for MockExchangeClient {
    async fn check_currencies_exist(&self, symbols: &[Currency]) -> anyhow::Result<Vec<Currency>> {
        Ok(symbols
            .iter()
            .filter(|c| !self.known.contains(c))
            .cloned()
            .collect())
    }

    async fn check_pair_exists(&self, base: &Currency, quote: &Currency) -> anyhow::Result<bool> {
        Ok(self
            .books
            .contains_key(&(base.as_str().to_string(), quote.as_str().to_string())))
    }

    async fn order_book_top(&self, base: &Currency, quote: &Currency) -> anyhow::Result<OrderBookTop> {
        self.books
            .get(&(base.as_str().to_string(), quote.as_str().to_string()))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no order book for {base}/{quote}"))
    }

    async fn pair_metadata(&self, base: &Currency, quote: &Currency) -> anyhow::Result<PairMetadata> {
        self.metadata
            .get(&(base.as_str().to_string(), quote.as_str().to_string()))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no metadata for {base}/{quote}"))
    }

    async fn close(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
