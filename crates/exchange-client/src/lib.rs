//! The capability contract the detector depends on, plus the venue's fee
//! schedule. No concrete HTTP client is implemented here — the real exchange
//! integration is out of scope; `bin/arbitrage-cli` ships an in-memory
//! double that implements this trait for demos and tests.

pub mod fees;

use arb_common::{Currency, Price, Quantity};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Best bid/ask for a pair at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBookTop {
    pub bid_price: Price,
    pub bid_size: Quantity,
    pub ask_price: Price,
    pub ask_size: Quantity,
}

/// Static per-pair trading metadata needed for sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairMetadata {
    /// Signed exponent `e` such that the lot size is `10^e`.
    pub base_lot_exponent: i32,
    pub notional_minimum: Price,
}

/// The capability set a venue must provide for the detector to run.
///
/// Mirrors the source client's duck-typed interface (`getOrderBook`,
/// `getNotionalMinLimit`, `getFees`, `closeSession`, ...) as an explicit,
/// statically-checked trait.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Aborts with the list of symbols not listed on the exchange, if any.
    async fn check_currencies_exist(&self, symbols: &[Currency]) -> anyhow::Result<Vec<Currency>>;

    /// Whether `(base, quote)` is a tradable pair on the exchange.
    async fn check_pair_exists(&self, base: &Currency, quote: &Currency) -> anyhow::Result<bool>;

    /// Top of book for `(base, quote)`.
    async fn order_book_top(&self, base: &Currency, quote: &Currency) -> anyhow::Result<OrderBookTop>;

    /// Lot size and notional minimum for `(base, quote)`.
    async fn pair_metadata(&self, base: &Currency, quote: &Currency) -> anyhow::Result<PairMetadata>;

    /// Taker fee fraction for the given 30-day USD trading volume.
    fn fee_for_volume(&self, usd_volume_30d: Decimal) -> Decimal {
        fees::fee_for_volume(usd_volume_30d)
    }

    /// Idempotent session teardown. Called on every exit path by the
    /// detector's `analyze` entry point, success or failure.
    async fn close(&self) -> anyhow::Result<()>;
}
