//! The structured outcome of a single `analyze` run, and its rendering to
//! the five report strings from the original console output.

use std::fmt;

use rust_decimal::Decimal;

use crate::sizing::Leg;

/// One fully-sized leg, ready to render.
#[derive(Debug, Clone)]
pub struct ReportLeg {
    pub leg: Leg,
    pub size: Decimal,
}

/// Outcome of an `analyze` run. Only transport/validation failures are
/// errors (see `AnalysisError`); every one of these is a normal, successful
/// analytical conclusion.
#[derive(Debug, Clone)]
pub enum Report {
    /// No strongly connected component of size ≥ 3 exists.
    NoSccAvailable,
    /// SCCs exist, but none contains a negative cycle.
    NoNegativeCycle,
    /// A negative cycle was found, but a leg's notional falls at or below
    /// its exchange minimum once lot-rounded.
    NotionalViolated,
    /// The cycle is valid but nets zero or negative profit.
    NotProfitable { legs: Vec<ReportLeg>, profit: Decimal },
    /// A profitable, executable cycle.
    Profitable { legs: Vec<ReportLeg>, profit: Decimal },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::NoSccAvailable => write!(
                f,
                "Given the currencies and the client, it is not possible to get an arbitrage."
            ),
            Report::NoNegativeCycle => write!(f, "No arbitrage has been found."),
            Report::NotionalViolated => write!(
                f,
                "An arbitrage has been found. It does NOT satisfy the notional minimum limit requirements."
            ),
            Report::NotProfitable { .. } => write!(
                f,
                "An arbitrage has been found. It satisfies the notional minimum limit requirements. It makes NO profit."
            ),
            Report::Profitable { legs, profit } => {
                writeln!(f, "A profitable arbitrage has been found.\n")?;
                for (index, report_leg) in legs.iter().enumerate() {
                    write_leg(f, index, report_leg)?;
                }
                let profit_currency = profit_currency(legs);
                write!(
                    f,
                    "\nA profit of {profit} {profit_currency} can be made via arbitrage."
                )
            }
        }
    }
}

fn profit_currency(legs: &[ReportLeg]) -> String {
    let first = &legs[0].leg;
    match first.position {
        arb_common::Position::Short => first.pair.base.to_string(),
        arb_common::Position::Long => first.pair.quote.to_string(),
    }
}

fn write_leg(f: &mut fmt::Formatter<'_>, index: usize, report_leg: &ReportLeg) -> fmt::Result {
    let leg = &report_leg.leg;
    let size = report_leg.size;
    let base = &leg.pair.base;
    let quote = &leg.pair.quote;

    match leg.position {
        arb_common::Position::Short => {
            let amount = size * leg.price.0 * (Decimal::ONE - leg.fee);
            let fee_paid = size * leg.price.0 * leg.fee;
            writeln!(
                f,
                "Order {order}: Sell {base}, to get {quote}, via an order of {size} {base} at price {price} {quote}.\n   --> Get {amount} {quote} having paid a fee of {fee_paid} {quote}.",
                order = index + 1,
                price = leg.price.0,
            )
        }
        arb_common::Position::Long => {
            let amount = size * leg.price.0;
            let fee_paid = size * leg.price.0 * leg.fee;
            writeln!(
                f,
                "Order {order}: Buy {base}, using {quote}, via an order of {size} {base} at price {price} {quote}.\n   --> Pay {amount} {quote} and a fee of {fee_paid} {quote}.",
                order = index + 1,
                price = leg.price.0,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_reports_render_the_exact_source_strings() {
        assert_eq!(
            Report::NoSccAvailable.to_string(),
            "Given the currencies and the client, it is not possible to get an arbitrage."
        );
        assert_eq!(Report::NoNegativeCycle.to_string(), "No arbitrage has been found.");
        assert_eq!(
            Report::NotionalViolated.to_string(),
            "An arbitrage has been found. It does NOT satisfy the notional minimum limit requirements."
        );
    }
}
