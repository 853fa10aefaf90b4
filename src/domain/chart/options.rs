//! Engine option objects. Field names follow the lightweight-charts option
//! schema so the structs serialize straight into the JS call.

use super::value_objects::ContainerSize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLineOptions {
    pub visible: bool,
    pub color: String,
    /// 2 = dashed
    pub style: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub vert_lines: GridLineOptions,
    pub horz_lines: GridLineOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeScaleOptions {
    pub right_offset: u32,
    pub border_visible: bool,
    pub bar_spacing: u32,
    pub time_visible: bool,
    pub fix_left_edge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceScaleOptions {
    pub border_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairLineOptions {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairOptions {
    pub horz_line: CrosshairLineOptions,
    pub vert_line: CrosshairLineOptions,
    /// 0 = normal (free-moving crosshair)
    pub mode: u8,
}

/// Options for `createChart`. The time formatter is attached by the engine
/// adapter since it is a JS function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub layout: LayoutOptions,
    pub grid: GridOptions,
    pub time_scale: TimeScaleOptions,
    pub price_scale: PriceScaleOptions,
    pub crosshair: CrosshairOptions,
}

impl ChartOptions {
    pub fn sized(&self, size: ContainerSize) -> Self {
        Self { width: size.width, height: size.height, ..self.clone() }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        let grid_line = GridLineOptions { visible: true, color: "rgba(0, 48, 0, 0.2)".to_string(), style: 2 };
        Self {
            width: 0,
            height: 0,
            layout: LayoutOptions {
                background_color: "rgba(255, 255, 255, 0)".to_string(),
                text_color: "#ccc".to_string(),
                font_family: "Inter".to_string(),
            },
            grid: GridOptions { vert_lines: grid_line.clone(), horz_lines: grid_line },
            time_scale: TimeScaleOptions {
                right_offset: 5,
                border_visible: false,
                bar_spacing: 5,
                time_visible: true,
                fix_left_edge: true,
            },
            price_scale: PriceScaleOptions { border_visible: false },
            crosshair: CrosshairOptions {
                horz_line: CrosshairLineOptions { color: "#aaa".to_string() },
                vert_line: CrosshairLineOptions { color: "#aaa".to_string() },
                mode: 0,
            },
        }
    }
}

/// Options for the candlestick series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOptions {
    pub line_color: String,
    pub top_color: String,
    pub bottom_color: String,
    pub line_width: u32,
    pub price_line_color: String,
    pub down_color: String,
    pub wick_down_color: String,
    pub up_color: String,
    pub wick_up_color: String,
    pub border_visible: bool,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            line_color: "rgba(0, 48, 0, 0.2)".to_string(),
            top_color: "rgba(49, 69, 131, 0.4)".to_string(),
            bottom_color: "rgba(42, 64, 103, 0.0)".to_string(),
            line_width: 2,
            price_line_color: "rgba(0, 48, 0, 1)".to_string(),
            down_color: "#FF5621".to_string(),
            wick_down_color: "#FF5621".to_string(),
            up_color: "#4FE021".to_string(),
            wick_up_color: "#4FE021".to_string(),
            border_visible: false,
        }
    }
}
