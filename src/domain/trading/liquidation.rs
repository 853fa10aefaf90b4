use super::entities::{Position, Side};
use crate::domain::market_data::Price;

pub const BASIS_POINTS_DIVISOR: f64 = 10_000.0;
pub const MARGIN_FEE_BASIS_POINTS: f64 = 10.0;
pub const LIQUIDATION_FEE_USD: f64 = 5.0;
pub const MAX_LEVERAGE_BPS: f64 = 100.0 * BASIS_POINTS_DIVISOR;
pub const FUNDING_RATE_PRECISION: f64 = 1_000_000.0;

/// Fees that are taken out of collateral when the position is liquidated.
pub fn liquidation_fees(position: &Position) -> f64 {
    let mut fees = position.size * MARGIN_FEE_BASIS_POINTS / BASIS_POINTS_DIVISOR + LIQUIDATION_FEE_USD;
    if let (Some(entry), Some(cumulative)) = (position.entry_funding_rate, position.cumulative_funding_rate) {
        fees += position.size * (cumulative - entry) / FUNDING_RATE_PRECISION;
    }
    fees
}

/// Price at which remaining collateral equals `liquidation_amount`.
fn price_from_delta(liquidation_amount: f64, position: &Position) -> Option<f64> {
    if position.size <= 0.0 {
        return None;
    }
    let avg = position.average_price.value();
    let long = position.side.is_long();

    if liquidation_amount > position.collateral {
        let delta = (liquidation_amount - position.collateral) * avg / position.size;
        return Some(if long { avg + delta } else { avg - delta });
    }

    let delta = (position.collateral - liquidation_amount) * avg / position.size;
    Some(if long { avg - delta } else { avg + delta })
}

/// Liquidation price of a position: whichever of the fee threshold and the
/// max-leverage threshold is hit first.
pub fn liquidation_price(position: &Position) -> Option<Price> {
    let for_fees = price_from_delta(liquidation_fees(position), position);
    let max_leverage_amount = position.size * BASIS_POINTS_DIVISOR / MAX_LEVERAGE_BPS;
    let for_leverage = price_from_delta(max_leverage_amount, position);

    let price = match (for_fees, for_leverage) {
        (Some(a), Some(b)) => match position.side {
            Side::Long => a.max(b),
            Side::Short => a.min(b),
        },
        (a, b) => a.or(b)?,
    };
    Some(Price::new(price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tokens::Token;
    use std::rc::Rc;

    fn eth() -> Rc<Token> {
        Rc::new(Token::new("0xeth", "ETH"))
    }

    #[test]
    fn long_liquidates_at_max_leverage_threshold() {
        // fees 15 -> 1803, leverage amount 100 -> 1820; long takes the higher
        let position = Position::new(eth(), Side::Long, 10_000.0, 1_000.0, 2_000.0);
        assert_eq!(liquidation_price(&position), Some(Price::new(1820.0)));
    }

    #[test]
    fn short_liquidates_above_entry() {
        let position = Position::new(eth(), Side::Short, 10_000.0, 1_000.0, 2_000.0);
        assert_eq!(liquidation_price(&position), Some(Price::new(2180.0)));
    }

    #[test]
    fn funding_fees_raise_the_fee_threshold() {
        let base = Position::new(eth(), Side::Long, 10_000.0, 1_000.0, 2_000.0);
        let funded = base.clone().with_funding(0.0, 100_000.0);
        assert!(liquidation_fees(&funded) > liquidation_fees(&base));
        assert_eq!(liquidation_fees(&funded), 10.0 + 5.0 + 1_000.0);
    }

    #[test]
    fn underwater_collateral_moves_price_past_entry() {
        // collateral below fees: long liquidation price sits above entry
        let position = Position::new(eth(), Side::Long, 10_000.0, 10.0, 2_000.0);
        let liq = liquidation_price(&position).unwrap();
        assert!(liq.value() > 2_000.0);
    }

    #[test]
    fn empty_position_has_no_liquidation_price() {
        let position = Position::new(eth(), Side::Long, 0.0, 100.0, 2_000.0);
        assert_eq!(liquidation_price(&position), None);
    }
}
