use super::value_objects::PricePoint;
use crate::domain::market_data::{Price, PriceBar, Timestamp};

/// Candle under the crosshair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverCandle {
    pub time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl HoverCandle {
    pub fn new(time: Timestamp, point: &PricePoint) -> Self {
        Self { time, open: point.open, high: point.high, low: point.low, close: point.close }
    }

    /// Flat candles count as rising.
    pub fn is_rising(&self) -> bool {
        self.open <= self.close
    }
}

impl From<&PriceBar> for HoverCandle {
    fn from(bar: &PriceBar) -> Self {
        Self { time: bar.time, open: bar.open, high: bar.high, low: bar.low, close: bar.close }
    }
}

/// O/H/L/C strip shown under the chart
#[derive(Debug, Clone, PartialEq)]
pub struct CandleStats {
    pub candle: HoverCandle,
    pub rising: bool,
    /// Digits in the integer part of the close, drives the label width class
    pub close_digits: usize,
}

impl CandleStats {
    const DECIMALS: usize = 2;

    pub fn new(candle: HoverCandle) -> Self {
        Self {
            rising: candle.is_rising(),
            close_digits: (candle.close.value().trunc() as i64).to_string().len(),
            candle,
        }
    }

    pub fn class_name(&self) -> String {
        format!(
            "ExchangeChart-bottom-stats {} length-{}",
            if self.rising { "positive" } else { "negative" },
            self.close_digits
        )
    }

    pub fn entries(&self) -> [(&'static str, String); 4] {
        let fmt = |p: Price| format!("{:.*}", Self::DECIMALS, p.value());
        [
            ("O", fmt(self.candle.open)),
            ("H", fmt(self.candle.high)),
            ("L", fmt(self.candle.low)),
            ("C", fmt(self.candle.close)),
        ]
    }

    pub fn to_text(&self) -> String {
        self.entries().iter().map(|(label, value)| format!("{label} {value}")).collect::<Vec<_>>().join(" ")
    }
}

/// Readout for the hovered candle, or the latest bar when nothing is hovered.
/// An empty series shows nothing, even with a hover left over.
pub fn candle_stats(hovered: Option<&HoverCandle>, bars: &[PriceBar]) -> Option<CandleStats> {
    let last = bars.last()?;
    let candle = match hovered {
        Some(candle) => *candle,
        None => HoverCandle::from(last),
    };
    Some(CandleStats::new(candle))
}
