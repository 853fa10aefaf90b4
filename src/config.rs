use crate::domain::chart::{ChartOptions, PriceLineBuilder, SeriesOptions};
use crate::domain::errors::ConfigResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Price line styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceLineConfig {
    pub color: String,
    pub title_width: usize,
    pub precision: u32,
}

impl Default for PriceLineConfig {
    fn default() -> Self {
        let builder = PriceLineBuilder::default();
        Self { color: builder.color, title_width: builder.title_width, precision: builder.precision }
    }
}

/// Tunables of the chart overlay. Every field has a default, so a partial
/// JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    pub refresh_interval_secs: u64,
    pub resize_debounce_ms: u64,
    /// Initial window width in chart periods (7 × 24 / 2: three and a half
    /// days on the hourly chart)
    pub visible_window_periods: f64,
    pub price_lines: PriceLineConfig,
    pub chart: ChartOptions,
    pub series: SeriesOptions,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 60,
            resize_debounce_ms: 500,
            visible_window_periods: 7.0 * 24.0 / 2.0,
            price_lines: PriceLineConfig::default(),
            chart: ChartOptions::default(),
            series: SeriesOptions::default(),
        }
    }
}

impl OverlayConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn line_builder(&self) -> PriceLineBuilder {
        PriceLineBuilder {
            color: self.price_lines.color.clone(),
            title_width: self.price_lines.title_width,
            precision: self.price_lines.precision,
        }
    }
}
