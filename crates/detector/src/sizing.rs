//! Computes the maximum executable size for each leg of an arbitrage cycle,
//! adjusts for base-currency lot precision, checks the notional minimum, and
//! computes the resulting profit.
//!
//! Ported leg-for-leg from the original `Arbitrage` class
//! (`calculateMaximumOrderSize`, `adjustOrderSizeForBaseTickSize`,
//! `checkNotionalMinimumLimit`, `calculateProfit`).

use arb_common::decimal::{check_notional_minimum, round_down_to_lot};
use arb_common::{CurrencyPair, Position, Price, Quantity};
use rust_decimal::Decimal;

/// One leg of an arbitrage cycle, with everything the sizer needs.
#[derive(Debug, Clone)]
pub struct Leg {
    pub pair: CurrencyPair,
    pub position: Position,
    pub price: Price,
    pub available_quantity: Quantity,
    pub fee: Decimal,
    pub base_lot_exponent: i32,
    pub notional_minimum: Price,
}

/// The fully-worked result of sizing an arbitrage cycle.
#[derive(Debug, Clone)]
pub struct SizingResult {
    pub raw_sizes: Vec<Decimal>,
    pub adjusted_sizes: Vec<Decimal>,
    pub notional_satisfied: bool,
    pub profit: Decimal,
}

/// Runs the full sizing pipeline over `legs`, in cycle order.
pub fn size_cycle(legs: &[Leg]) -> SizingResult {
    let raw_sizes = calculate_maximum_order_sizes(legs);
    let adjusted_sizes = adjust_for_lot_size(legs, &raw_sizes);
    let notional_satisfied = check_notional_minimum_for_all(legs, &adjusted_sizes);
    let profit = calculate_profit(legs, &adjusted_sizes);

    SizingResult {
        raw_sizes,
        adjusted_sizes,
        notional_satisfied,
        profit,
    }
}

/// Walks the cycle leg by leg, tracking funds available after each trade,
/// and retroactively rescaling every earlier leg's size whenever a later
/// leg's available liquidity turns out to be the binding constraint.
///
/// `None` stands in for the source's "infinite funds" starting state
/// (Python's `np.inf`), which is always displaced by the first leg.
fn calculate_maximum_order_sizes(legs: &[Leg]) -> Vec<Decimal> {
    let mut sizes = vec![Decimal::ZERO; legs.len()];
    let mut amount_after_trade: Option<Decimal> = None;

    for (index, leg) in legs.iter().enumerate() {
        let fee = leg.fee;
        let price = leg.price.0;
        let size = leg.available_quantity.0;

        match leg.position {
            Position::Short => {
                let fits = matches!(amount_after_trade, Some(amt) if amt <= size);
                if fits {
                    let amt = amount_after_trade.unwrap();
                    sizes[index] = amt;
                    amount_after_trade = Some(amt * price * (Decimal::ONE - fee));
                } else {
                    let ratio = match amount_after_trade {
                        Some(amt) => size / amt,
                        None => Decimal::ZERO,
                    };
                    rescale(&mut sizes[..index], ratio);
                    sizes[index] = size;
                    amount_after_trade = Some(size * price * (Decimal::ONE - fee));
                }
            }
            Position::Long => {
                let required = size * price * (Decimal::ONE + fee);
                let fits = matches!(amount_after_trade, Some(amt) if amt <= required);
                if fits {
                    let amt = amount_after_trade.unwrap();
                    let sized = amt / (price * (Decimal::ONE + fee));
                    sizes[index] = sized;
                    amount_after_trade = Some(sized);
                } else {
                    let ratio = match amount_after_trade {
                        Some(amt) => required / amt,
                        None => Decimal::ZERO,
                    };
                    rescale(&mut sizes[..index], ratio);
                    sizes[index] = size;
                    amount_after_trade = Some(size);
                }
            }
        }
    }

    sizes
}

fn rescale(sizes: &mut [Decimal], ratio: Decimal) {
    for s in sizes.iter_mut() {
        *s *= ratio;
    }
}

/// Floors each leg's raw size down to its lot boundary, rescaling every
/// later leg's size by the same ratio whenever rounding changes a size.
fn adjust_for_lot_size(legs: &[Leg], raw_sizes: &[Decimal]) -> Vec<Decimal> {
    let mut sizes = raw_sizes.to_vec();
    let mut adjusted = Vec::with_capacity(sizes.len());

    for index in 0..sizes.len() {
        let size = sizes[index];
        let adjusted_size = round_down_to_lot(size, legs[index].base_lot_exponent);

        if adjusted_size != size {
            // size == 0 implies adjusted_size == 0 too, so this branch is
            // only reached with a nonzero `size` — no division by zero.
            let ratio = adjusted_size / size;
            rescale(&mut sizes, ratio);
        }
        adjusted.push(adjusted_size);
    }

    adjusted
}

fn check_notional_minimum_for_all(legs: &[Leg], adjusted_sizes: &[Decimal]) -> bool {
    legs.iter().zip(adjusted_sizes).all(|(leg, &size)| {
        check_notional_minimum(size, leg.price.0, leg.notional_minimum.0)
    })
}

/// Profit in leg-0's starting currency: final amount received minus initial
/// amount spent.
///
/// NOTE: when the cycle's first leg is a long (buy), the source computes the
/// initial spend as `size * price * (1 - fee)` rather than `(1 + fee)` —
/// buying should cost more with the fee added, not less. This is reproduced
/// faithfully rather than silently corrected; see SPEC_FULL.md §9.
fn calculate_profit(legs: &[Leg], adjusted_sizes: &[Decimal]) -> Decimal {
    let first = &legs[0];
    let start_amount = match first.position {
        Position::Short => adjusted_sizes[0],
        Position::Long => adjusted_sizes[0] * first.price.0 * (Decimal::ONE - first.fee),
    };

    let last = legs.last().expect("cycle has at least one leg");
    let last_size = *adjusted_sizes.last().expect("cycle has at least one leg");
    let end_amount = match last.position {
        Position::Long => last_size,
        Position::Short => last_size * last.price.0 * (Decimal::ONE - last.fee),
    };

    end_amount - start_amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use arb_common::Currency;
    use rust_decimal_macros::dec;

    fn leg(
        base: &str,
        quote: &str,
        position: Position,
        price: Decimal,
        qty: Decimal,
        fee: Decimal,
        lot_exponent: i32,
        notional_minimum: Decimal,
    ) -> Leg {
        Leg {
            pair: CurrencyPair::new(Currency::from(base), Currency::from(quote)),
            position,
            price: Price(price),
            available_quantity: Quantity(qty),
            fee,
            base_lot_exponent: lot_exponent,
            notional_minimum: Price(notional_minimum),
        }
    }

    /// The five-leg cycle from the source's own test fixtures
    /// (`testDataOne`): an unprofitable cycle whose tail collapses to zero
    /// once lot rounding is applied.
    fn cycle_one() -> Vec<Leg> {
        vec![
            leg("A", "B", Position::Short, dec!(10), dec!(10), dec!(0.01), -4, dec!(0.01)),
            leg("B", "C", Position::Long, dec!(10), dec!(5), dec!(0.01), -2, dec!(0.1)),
            leg("C", "D", Position::Short, dec!(2), dec!(1), dec!(0.03), 0, dec!(0.55)),
            leg("D", "E", Position::Long, dec!(3), dec!(10), dec!(0.01), -5, dec!(1)),
            leg("E", "A", Position::Short, dec!(2), dec!(100), dec!(0.02), -4, dec!(1)),
        ]
    }

    #[test]
    fn raw_sizing_matches_source_fixture() {
        let sizes = calculate_maximum_order_sizes(&cycle_one());
        let expected = [
            dec!(1.020202),
            dec!(1.0),
            dec!(1.0),
            dec!(0.64026403),
            dec!(0.64026403),
        ];
        for (got, want) in sizes.iter().zip(expected.iter()) {
            let diff = (*got - *want).abs();
            assert!(diff < dec!(0.00000001), "got {got}, want {want}");
        }
    }

    #[test]
    fn lot_adjustment_collapses_the_tail() {
        let legs = cycle_one();
        let raw = calculate_maximum_order_sizes(&legs);
        let adjusted = adjust_for_lot_size(&legs, &raw);
        assert_eq!(adjusted[0], dec!(1.0202));
        assert_eq!(adjusted[1], dec!(0.99));
        assert_eq!(adjusted[2], dec!(0));
        assert_eq!(adjusted[3], dec!(0));
        assert_eq!(adjusted[4], dec!(0));
    }

    #[test]
    fn notional_check_fails_once_a_leg_collapses_to_zero() {
        let legs = cycle_one();
        let raw = calculate_maximum_order_sizes(&legs);
        let adjusted = adjust_for_lot_size(&legs, &raw);
        assert!(!check_notional_minimum_for_all(&legs, &adjusted));
    }

    #[test]
    fn profit_is_negative_when_the_cycle_collapses() {
        let legs = cycle_one();
        let raw = calculate_maximum_order_sizes(&legs);
        let adjusted = adjust_for_lot_size(&legs, &raw);
        let profit = calculate_profit(&legs, &adjusted);
        let diff = (profit - dec!(-1.0202)).abs();
        assert!(diff < dec!(0.0001), "profit was {profit}");
    }

    /// The source's second fixture (`testDataTwo`): a cycle that survives
    /// lot rounding and notional checks, and nets a small profit.
    fn cycle_two() -> Vec<Leg> {
        vec![
            leg("A", "B", Position::Short, dec!(10), dec!(10), dec!(0.01), -5, dec!(1)),
            leg("B", "C", Position::Short, dec!(2), dec!(100), dec!(0.02), -4, dec!(0.1)),
            leg("C", "D", Position::Long, dec!(10), dec!(5), dec!(0.01), -2, dec!(0.01)),
            leg("D", "E", Position::Short, dec!(2), dec!(1), dec!(0.03), -2, dec!(1)),
            leg("E", "A", Position::Long, dec!(3), dec!(10), dec!(0.01), -5, dec!(0.72)),
        ]
    }

    #[test]
    fn raw_sizing_matches_second_source_fixture() {
        let sizes = calculate_maximum_order_sizes(&cycle_two());
        let expected = [
            dec!(0.52051123),
            dec!(5.15306122),
            dec!(1.0),
            dec!(1.0),
            dec!(0.64026403),
        ];
        for (got, want) in sizes.iter().zip(expected.iter()) {
            let diff = (*got - *want).abs();
            assert!(diff < dec!(0.00000001), "got {got}, want {want}");
        }
    }

    #[test]
    fn lot_adjustment_on_second_fixture_survives_with_a_small_tail_rescale() {
        let legs = cycle_two();
        let raw = calculate_maximum_order_sizes(&legs);
        let adjusted = adjust_for_lot_size(&legs, &raw);
        assert_eq!(adjusted[0], dec!(0.52051));
        assert_eq!(adjusted[1], dec!(5.1530));
        assert_eq!(adjusted[2], dec!(0.99));
        assert_eq!(adjusted[3], dec!(0.99));
        let diff = (adjusted[4] - dec!(0.63386)).abs();
        assert!(diff < dec!(0.00001), "adjusted[4] was {}", adjusted[4]);
    }

    #[test]
    fn notional_check_passes_on_second_fixture() {
        let legs = cycle_two();
        let raw = calculate_maximum_order_sizes(&legs);
        let adjusted = adjust_for_lot_size(&legs, &raw);
        assert!(check_notional_minimum_for_all(&legs, &adjusted));
    }

    #[test]
    fn profit_is_positive_on_second_fixture() {
        let legs = cycle_two();
        let raw = calculate_maximum_order_sizes(&legs);
        let adjusted = adjust_for_lot_size(&legs, &raw);
        let profit = calculate_profit(&legs, &adjusted);
        let diff = (profit - dec!(0.11335)).abs();
        assert!(diff < dec!(0.0001), "profit was {profit}");
    }

    #[test]
    fn size_cycle_wires_the_whole_pipeline_together() {
        let result = size_cycle(&cycle_one());
        assert!(!result.notional_satisfied);
        assert!(result.profit < Decimal::ZERO);
        assert_eq!(result.raw_sizes.len(), 5);
        assert_eq!(result.adjusted_sizes.len(), 5);
    }
}
