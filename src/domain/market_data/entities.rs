pub use super::value_objects::{Price, Timestamp};
use crate::domain::errors::AppError;
use serde::{Deserialize, Serialize};

/// Domain entity - one candlestick as handed to the chart engine.
///
/// Serializes to the engine's `{time, open, high, low, close}` bar shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl PriceBar {
    pub fn new(time: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self { time, open, high, low, close }
    }
}

/// Bar times must strictly increase; the engine rejects repeats and steps back.
pub fn validate_series(bars: &[PriceBar]) -> Result<(), AppError> {
    match bars.windows(2).position(|pair| pair[0].time >= pair[1].time) {
        None => Ok(()),
        Some(index) => Err(AppError::ValidationError(format!(
            "bar {} at {} does not follow {}",
            index + 1,
            bars[index + 1].time,
            bars[index].time
        ))),
    }
}
