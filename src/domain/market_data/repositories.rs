use crate::domain::market_data::{ChartPeriod, PriceBar, Symbol};
use std::rc::Rc;

/// Source of candles for the active market.
///
/// `series` may be empty while the first load is in flight. A refresh only
/// schedules a reload; new bars arrive through the next input update.
pub trait PriceFeed {
    fn series(&self, symbol: &Symbol, period: ChartPeriod) -> Rc<[PriceBar]>;

    fn request_refresh(&self);
}
