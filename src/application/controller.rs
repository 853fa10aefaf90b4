//! Glue between trade-form state and the chart engine.
//!
//! The host pushes a fresh [`ChartInputs`] whenever any of its sources
//! change. The controller diffs it against the previous push by identity
//! and only re-runs the stages whose inputs moved: chart creation, series
//! data and first placement, price lines, debounced resize.

use super::binding::SeriesBinding;
use super::hover::{HoverListener, HoverState};
use super::line_reconciler::LineReconciler;
use super::overlay::OverlaySelector;
use super::scheduler::Scheduler;
use super::viewport::{ViewportController, initial_range};
use crate::config::OverlayConfig;
use crate::domain::chart::{CandleStats, HoverCandle, PriceLineBuilder, RenderingEngine, candle_stats};
use crate::domain::logging::{LogComponent, TimeProvider};
use crate::domain::market_data::{ChartPeriod, PriceBar, PriceFeed, Symbol};
use crate::domain::tokens::{ChainId, Token, TokenRegistry, TradeMode, resolve_chart_token};
use crate::domain::trading::{Order, Position};
use crate::{log_debug, log_error, log_info};
use std::rc::Rc;

const COMPONENT: LogComponent = LogComponent::Application("ChartOverlay");

/// Snapshot of everything the chart depends on.
#[derive(Debug, Clone)]
pub struct ChartInputs {
    pub chain_id: ChainId,
    pub trade_mode: TradeMode,
    pub from_token: Option<Rc<Token>>,
    pub to_token: Option<Rc<Token>>,
    pub period: ChartPeriod,
    pub orders: Rc<[Order]>,
    /// Already narrowed to the charted market by the caller
    pub positions: Rc<[Position]>,
    pub show_position_lines: bool,
    pub sidebar_visible: bool,
}

impl ChartInputs {
    pub fn new(chain_id: ChainId, trade_mode: TradeMode) -> Self {
        Self {
            chain_id,
            trade_mode,
            from_token: None,
            to_token: None,
            period: ChartPeriod::default(),
            orders: Rc::from(Vec::new()),
            positions: Rc::from(Vec::new()),
            show_position_lines: true,
            sidebar_visible: false,
        }
    }

    pub fn with_tokens(mut self, from: Option<Rc<Token>>, to: Option<Rc<Token>>) -> Self {
        self.from_token = from;
        self.to_token = to;
        self
    }
}

fn same_token(a: Option<&Rc<Token>>, b: Option<&Rc<Token>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

pub struct ChartOverlayController<E: RenderingEngine, S: Scheduler> {
    engine: Rc<E>,
    registry: Rc<dyn TokenRegistry>,
    clock: Rc<dyn TimeProvider>,
    feed: Rc<dyn PriceFeed>,
    config: OverlayConfig,
    line_builder: PriceLineBuilder,
    container: E::Container,
    binding: SeriesBinding<E>,
    selector: OverlaySelector,
    lines: LineReconciler<E>,
    viewport: ViewportController<S>,
    hover: HoverState,
    instrument: Option<Rc<Token>>,
    price_data: Rc<[PriceBar]>,
    last: Option<ChartInputs>,
}

impl<E: RenderingEngine, S: Scheduler> ChartOverlayController<E, S> {
    /// Mounts the controller on `container` and starts the refresh timer.
    /// The chart itself is created on the first update that brings data.
    pub fn new(
        engine: Rc<E>,
        scheduler: S,
        registry: Rc<dyn TokenRegistry>,
        clock: Rc<dyn TimeProvider>,
        feed: Rc<dyn PriceFeed>,
        config: OverlayConfig,
        container: E::Container,
    ) -> Self {
        let mut viewport = ViewportController::new(scheduler, config.resize_debounce());
        viewport.start_refresh(Rc::clone(&feed), config.refresh_interval());
        log_info!(COMPONENT, "mounted, refreshing prices every {}s", config.refresh_interval_secs);

        Self {
            engine,
            registry,
            clock,
            feed,
            line_builder: config.line_builder(),
            config,
            container,
            binding: SeriesBinding::new(),
            selector: OverlaySelector::new(),
            lines: LineReconciler::new(),
            viewport,
            hover: HoverState::new(),
            instrument: None,
            price_data: Rc::from(Vec::new()),
            last: None,
        }
    }

    pub fn update(&mut self, inputs: ChartInputs) {
        let previous = self.last.take();

        let instrument = resolve_chart_token(
            inputs.trade_mode,
            inputs.from_token.as_ref(),
            inputs.to_token.as_ref(),
            inputs.chain_id,
            self.registry.as_ref(),
        );
        let market = instrument.as_ref().map(|token| token.market_name());
        if self.binding.track_market(market.as_deref()) {
            log_info!(COMPONENT, "charting {}", market.as_deref().unwrap_or("nothing"));
            self.hover.clear();
        }
        let instrument_changed = !same_token(self.instrument.as_ref(), instrument.as_ref());
        self.instrument = instrument;

        let price_data = match &market {
            Some(name) => self.feed.series(&Symbol::from(name.as_str()), inputs.period),
            None => Rc::from(Vec::new()),
        };
        let data_changed = !Rc::ptr_eq(&self.price_data, &price_data);
        self.price_data = price_data;

        let just_bound = self.ensure_bound();
        let sidebar_toggled = previous.as_ref().is_some_and(|p| p.sidebar_visible != inputs.sidebar_visible);
        if just_bound || sidebar_toggled {
            self.schedule_resize();
        }

        self.push_series_data(data_changed || just_bound, inputs.period);
        self.sync_lines(&inputs, previous.as_ref(), instrument_changed || just_bound);
        self.last = Some(inputs);
    }

    /// Window resizes apply immediately.
    pub fn on_window_resize(&self) {
        if let Some(chart) = self.binding.chart() {
            self.viewport.resize_now(self.engine.as_ref(), chart, &self.container);
        }
    }

    /// Layout changes outside of the inputs (panels, splitters) resize after
    /// the debounce, restarting any pending one.
    pub fn on_layout_change(&mut self) {
        self.schedule_resize();
    }

    /// Stats for the hovered candle, else the latest one.
    pub fn readout(&self) -> Option<CandleStats> {
        candle_stats(self.hover.current().as_deref(), &self.price_data)
    }

    pub fn hover_state(&self) -> Option<Rc<HoverCandle>> {
        self.hover.current()
    }

    pub fn set_hover_listener(&self, listener: HoverListener) {
        self.hover.set_listener(listener);
    }

    pub fn instrument(&self) -> Option<&Rc<Token>> {
        self.instrument.as_ref()
    }

    pub fn live_line_count(&self) -> usize {
        self.lines.live_count()
    }

    pub fn is_chart_created(&self) -> bool {
        self.binding.is_bound()
    }

    fn ensure_bound(&mut self) -> bool {
        if self.binding.is_bound() || self.price_data.is_empty() {
            return false;
        }
        match self.binding.bind(self.engine.as_ref(), &self.container, &self.config, self.hover.crosshair_handler()) {
            Ok(bound) => {
                if bound {
                    log_info!(COMPONENT, "chart created");
                }
                bound
            }
            Err(e) => {
                log_error!(COMPONENT, "chart creation failed: {}", e);
                false
            }
        }
    }

    fn schedule_resize(&mut self) {
        if let Some(chart) = self.binding.chart().cloned() {
            self.viewport.schedule_resize(&self.engine, &chart, &self.container);
        }
    }

    fn push_series_data(&mut self, changed: bool, period: ChartPeriod) {
        let (Some(chart), Some(series)) = (self.binding.chart().cloned(), self.binding.series().cloned()) else {
            return;
        };
        if self.price_data.is_empty() {
            return;
        }
        let first_for_market = !self.binding.is_initialized();
        if changed || first_for_market {
            self.engine.set_series_data(&series, &self.price_data);
        }
        if first_for_market {
            let range = initial_range(
                self.clock.now_secs(),
                self.clock.timezone_offset_secs(),
                period,
                self.config.visible_window_periods,
            );
            self.viewport.apply_initial_range(self.engine.as_ref(), &chart, range);
            self.binding.mark_initialized();
            log_debug!(COMPONENT, "visible range {} .. {}", range.from, range.to);
        }
    }

    fn sync_lines(&mut self, inputs: &ChartInputs, previous: Option<&ChartInputs>, force: bool) {
        let (orders, selection_changed) = self.selector.select(
            &inputs.orders,
            self.instrument.as_ref(),
            inputs.trade_mode,
            inputs.chain_id,
            self.registry.as_ref(),
        );
        let others_changed = previous.is_none_or(|p| {
            !Rc::ptr_eq(&p.positions, &inputs.positions)
                || p.show_position_lines != inputs.show_position_lines
                || p.chain_id != inputs.chain_id
        });
        if !(force || selection_changed || others_changed) {
            return;
        }
        let Some(series) = self.binding.series().cloned() else {
            return;
        };

        if !inputs.show_position_lines || self.instrument.is_none() {
            self.lines.clear(self.engine.as_ref());
            return;
        }
        let specs = self.line_builder.build(&orders, &inputs.positions, inputs.chain_id, self.registry.as_ref());
        self.lines.reconcile(self.engine.as_ref(), &series, &specs);
        log_debug!(
            COMPONENT,
            "{} price lines ({} orders, {} positions)",
            self.lines.live_count(),
            orders.len(),
            inputs.positions.len()
        );
    }
}

impl<E: RenderingEngine, S: Scheduler> Drop for ChartOverlayController<E, S> {
    fn drop(&mut self) {
        self.lines.clear(self.engine.as_ref());
        self.viewport.stop();
        log_debug!(COMPONENT, "unmounted");
    }
}
