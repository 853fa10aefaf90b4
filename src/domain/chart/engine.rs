use super::options::{ChartOptions, SeriesOptions};
use super::value_objects::{ContainerSize, CrosshairEvent, PriceLineSpec, VisibleRange};
use crate::domain::errors::RenderingResult;
use crate::domain::market_data::PriceBar;

pub type CrosshairHandler = Box<dyn FnMut(CrosshairEvent)>;

/// Imperative surface of the charting library.
///
/// Handles are cheap clones of engine-side objects. All calls happen on the
/// UI thread; none of them block.
pub trait RenderingEngine: 'static {
    type Container: Clone + 'static;
    type Chart: Clone + 'static;
    type Series: Clone + 'static;
    type PriceLine: 'static;

    fn container_size(&self, container: &Self::Container) -> ContainerSize;

    fn create_chart(&self, container: &Self::Container, options: &ChartOptions) -> RenderingResult<Self::Chart>;

    fn add_candlestick_series(&self, chart: &Self::Chart, options: &SeriesOptions) -> RenderingResult<Self::Series>;

    fn subscribe_crosshair_move(&self, chart: &Self::Chart, handler: CrosshairHandler);

    fn set_series_data(&self, series: &Self::Series, bars: &[PriceBar]);

    fn create_price_line(&self, series: &Self::Series, spec: &PriceLineSpec) -> RenderingResult<Self::PriceLine>;

    fn remove_price_line(&self, series: &Self::Series, line: Self::PriceLine);

    fn set_visible_range(&self, chart: &Self::Chart, range: VisibleRange);

    fn resize(&self, chart: &Self::Chart, size: ContainerSize);
}
