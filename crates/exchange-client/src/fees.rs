//! Descending tiered fee schedule over 30-day USD trading volume.
//!
//! Ported from `CoinbaseClient.getFees`: walk the table in descending
//! volume order and return the first tier the traded volume clears.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `(minimum 30d USD volume, fee fraction)`, descending by volume. The last
/// row (volume 0) always matches, so `fee_for_volume` never falls through.
const TIERS: &[(Decimal, Decimal)] = &[
    (dec!(10_000_000_000), dec!(0)),
    (dec!(400_000_000), dec!(0.0005)),
    (dec!(250_000_000), dec!(0.0008)),
    (dec!(75_000_000), dec!(0.0012)),
    (dec!(15_000_000), dec!(0.0016)),
    (dec!(1_000_000), dec!(0.0018)),
    (dec!(100_000), dec!(0.0020)),
    (dec!(50_000), dec!(0.0025)),
    (dec!(10_000), dec!(0.0040)),
    (dec!(0), dec!(0.0060)),
];

/// Fee fraction (e.g. `0.0025` = 25bp) for `usd_volume_30d`.
pub fn fee_for_volume(usd_volume_30d: Decimal) -> Decimal {
    for (threshold, fee) in TIERS {
        if usd_volume_30d >= *threshold {
            return *fee;
        }
    }
    unreachable!("the zero-volume tier always matches")
}
