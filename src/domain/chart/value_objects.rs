use crate::domain::market_data::{Price, PriceBar, Timestamp};
use serde::{Deserialize, Serialize};

/// Pixel size of the chart container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

impl ContainerSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A collapsed container cannot host a chart yet.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Visible time window in offset-adjusted seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub from: Timestamp,
    pub to: Timestamp,
}

/// One horizontal price line as handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLineSpec {
    pub price: Price,
    pub color: String,
    pub title: String,
}

/// OHLC of one series at the hovered time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl From<&PriceBar> for PricePoint {
    fn from(bar: &PriceBar) -> Self {
        Self { open: bar.open, high: bar.high, low: bar.low, close: bar.close }
    }
}

/// Crosshair move as reported by the engine.
///
/// `series_prices` is ordered by series registration, so "first" is the
/// first series added to the chart, whatever order the engine keeps
/// internally. `time` is `None` once the pointer leaves the plot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrosshairEvent {
    pub time: Option<Timestamp>,
    pub series_prices: Vec<PricePoint>,
}

impl CrosshairEvent {
    pub fn left() -> Self {
        Self::default()
    }

    pub fn at(time: Timestamp, points: Vec<PricePoint>) -> Self {
        Self { time: Some(time), series_prices: points }
    }
}
