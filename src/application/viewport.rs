use super::scheduler::Scheduler;
use crate::domain::chart::{RenderingEngine, VisibleRange};
use crate::domain::market_data::{ChartPeriod, PriceFeed, Timestamp};
use std::rc::Rc;
use std::time::Duration;

/// Range shown when a market is first drawn: `window_periods` candles back
/// from now, both ends moved into local time.
pub fn initial_range(now_secs: i64, tz_offset_secs: i64, period: ChartPeriod, window_periods: f64) -> VisibleRange {
    let span = (window_periods * period.duration_secs() as f64) as i64;
    VisibleRange {
        from: Timestamp::new(now_secs - span + tz_offset_secs),
        to: Timestamp::new(now_secs + tz_offset_secs),
    }
}

/// Placement and sizing of the chart, and the periodic data refresh.
pub struct ViewportController<S: Scheduler> {
    scheduler: S,
    debounce: Duration,
    pending_resize: Option<S::Handle>,
    refresh: Option<S::Handle>,
}

impl<S: Scheduler> ViewportController<S> {
    pub fn new(scheduler: S, debounce: Duration) -> Self {
        Self { scheduler, debounce, pending_resize: None, refresh: None }
    }

    pub fn apply_initial_range<E: RenderingEngine>(&self, engine: &E, chart: &E::Chart, range: VisibleRange) {
        engine.set_visible_range(chart, range);
    }

    pub fn resize_now<E: RenderingEngine>(&self, engine: &E, chart: &E::Chart, container: &E::Container) {
        engine.resize(chart, engine.container_size(container));
    }

    /// Resizes after the debounce delay. A pending resize is cancelled.
    pub fn schedule_resize<E: RenderingEngine>(&mut self, engine: &Rc<E>, chart: &E::Chart, container: &E::Container) {
        self.pending_resize = None;
        let (engine, chart, container) = (Rc::clone(engine), chart.clone(), container.clone());
        let handle = self.scheduler.schedule_once(
            self.debounce,
            Box::new(move || engine.resize(&chart, engine.container_size(&container))),
        );
        self.pending_resize = Some(handle);
    }

    pub fn start_refresh(&mut self, feed: Rc<dyn PriceFeed>, every: Duration) {
        let handle = self.scheduler.schedule_repeating(every, Box::new(move || feed.request_refresh()));
        self.refresh = Some(handle);
    }

    pub fn stop(&mut self) {
        self.pending_resize = None;
        self.refresh = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_window_spans_three_and_a_half_days() {
        let range = initial_range(1_000_000, 7_200, ChartPeriod::OneHour, 84.0);
        assert_eq!(range.to, Timestamp::new(1_007_200));
        assert_eq!(range.to.value() - range.from.value(), 84 * 3_600);
    }

    #[test]
    fn west_of_utc_shifts_back() {
        let range = initial_range(1_000_000, -3_600, ChartPeriod::FiveMinutes, 84.0);
        assert_eq!(range.from, Timestamp::new(1_000_000 - 84 * 300 - 3_600));
    }
}
