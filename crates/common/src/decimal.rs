//! Lot-size rounding and notional-minimum checks.
//!
//! Ported from `adjustOrderSizeForBaseTickSize` / `checkNotionalMinimumLimit`
//! in the original Python arbitrage analyser: floor a raw order size down to
//! the nearest multiple of the base currency's lot size, then rescale every
//! other leg's size by the same ratio so the cycle's flow stays conserved.

use rust_decimal::Decimal;

/// `10^exponent` as an exact `Decimal`, with no float round-trip.
///
/// `exponent` is typically negative (e.g. `-8` for a lot size of
/// `0.00000001`), matching the sign convention of `basePrecision` in the
/// source client (`int(np.log10(decimal))`, negative for sub-unit lots).
pub fn lot_size_for_exponent(exponent: i32) -> Decimal {
    if exponent >= 0 {
        let mut value = Decimal::ONE;
        for _ in 0..exponent {
            value *= Decimal::TEN;
        }
        value
    } else {
        let mut value = Decimal::ONE;
        for _ in 0..(-exponent) {
            value /= Decimal::TEN;
        }
        value
    }
}

/// Floors `size` down to the nearest multiple of `lot_size_for_exponent(exponent)`.
///
/// Returns `Decimal::ZERO` when `size` is smaller than one lot — callers must
/// treat that as a rejected leg (a zero-size order has zero notional, which
/// `check_notional_minimum` will reject via its strict inequality).
pub fn round_down_to_lot(size: Decimal, exponent: i32) -> Decimal {
    let lot = lot_size_for_exponent(exponent);
    if lot.is_zero() {
        return size;
    }
    (size / lot).trunc() * lot
}

/// `true` iff `size * price` strictly exceeds `notional_minimum`.
///
/// The source check rejects on `<=`, i.e. the notional must be strictly
/// greater than the minimum to pass — equality at the minimum is a failure,
/// not a pass.
pub fn check_notional_minimum(size: Decimal, price: Decimal, notional_minimum: Decimal) -> bool {
    size * price > notional_minimum
}
