use crate::config::OverlayConfig;
use crate::domain::chart::{CrosshairHandler, RenderingEngine};
use crate::domain::errors::RenderingResult;

pub enum BindingPhase<E: RenderingEngine> {
    Uninitialized,
    Bound { chart: E::Chart, series: E::Series },
}

/// Chart and candlestick series of one controller, plus whether the
/// viewport has been placed for the current market.
pub struct SeriesBinding<E: RenderingEngine> {
    phase: BindingPhase<E>,
    market: Option<String>,
    initialized: bool,
}

impl<E: RenderingEngine> Default for SeriesBinding<E> {
    fn default() -> Self {
        Self { phase: BindingPhase::Uninitialized, market: None, initialized: false }
    }
}

impl<E: RenderingEngine> SeriesBinding<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the market differs from the tracked one, in which
    /// case the viewport is placed again on the next data push.
    pub fn track_market(&mut self, market: Option<&str>) -> bool {
        if self.market.as_deref() == market {
            return false;
        }
        self.market = market.map(str::to_string);
        self.initialized = false;
        true
    }

    /// Creates the chart once the container has a size.
    ///
    /// `Ok(true)` only on the call that performed the binding.
    pub fn bind(
        &mut self,
        engine: &E,
        container: &E::Container,
        config: &OverlayConfig,
        handler: CrosshairHandler,
    ) -> RenderingResult<bool> {
        if self.is_bound() {
            return Ok(false);
        }
        let size = engine.container_size(container);
        if size.is_empty() {
            return Ok(false);
        }
        let chart = engine.create_chart(container, &config.chart.sized(size))?;
        engine.subscribe_crosshair_move(&chart, handler);
        let series = engine.add_candlestick_series(&chart, &config.series)?;
        self.phase = BindingPhase::Bound { chart, series };
        Ok(true)
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.phase, BindingPhase::Bound { .. })
    }

    pub fn chart(&self) -> Option<&E::Chart> {
        match &self.phase {
            BindingPhase::Bound { chart, .. } => Some(chart),
            BindingPhase::Uninitialized => None,
        }
    }

    pub fn series(&self) -> Option<&E::Series> {
        match &self.phase {
            BindingPhase::Bound { series, .. } => Some(series),
            BindingPhase::Uninitialized => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}
