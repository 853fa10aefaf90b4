#![allow(dead_code)]

use perp_chart_overlay::application::{ChartInputs, ChartOverlayController, Scheduler};
use perp_chart_overlay::config::OverlayConfig;
use perp_chart_overlay::domain::chart::{
    ChartOptions, ContainerSize, CrosshairEvent, CrosshairHandler, PriceLineSpec, RenderingEngine, SeriesOptions,
    VisibleRange,
};
use perp_chart_overlay::domain::errors::RenderingResult;
use perp_chart_overlay::domain::logging::TimeProvider;
use perp_chart_overlay::domain::market_data::{ChartPeriod, Price, PriceBar, PriceFeed, Symbol, Timestamp};
use perp_chart_overlay::domain::tokens::{ChainId, StaticTokenRegistry, Token, TokenAddress, TokenRegistry, TradeMode};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

pub const CHAIN: ChainId = 42161;

/// Rendering engine that records every call.
#[derive(Default)]
pub struct FakeEngine {
    pub size: Cell<ContainerSize>,
    pub charts_created: Cell<usize>,
    pub series_added: Cell<usize>,
    pub data_pushes: RefCell<Vec<usize>>,
    pub lines_created: Cell<usize>,
    pub lines_removed: Cell<usize>,
    pub visible_ranges: RefCell<Vec<VisibleRange>>,
    pub resizes: RefCell<Vec<ContainerSize>>,
    pub chart_options: RefCell<Vec<ChartOptions>>,
    live: RefCell<BTreeMap<u64, PriceLineSpec>>,
    next_line: Cell<u64>,
    crosshair: RefCell<Option<CrosshairHandler>>,
}

impl FakeEngine {
    pub fn sized(width: u32, height: u32) -> Rc<Self> {
        let engine = Self::default();
        engine.size.set(ContainerSize::new(width, height));
        Rc::new(engine)
    }

    pub fn live_lines(&self) -> Vec<PriceLineSpec> {
        self.live.borrow().values().cloned().collect()
    }

    pub fn live_titles(&self) -> Vec<String> {
        self.live_lines().into_iter().map(|line| line.title).collect()
    }

    /// Delivers a crosshair move the way the engine would from a pointer event.
    pub fn emit(&self, event: CrosshairEvent) {
        let mut handler = self.crosshair.borrow_mut().take();
        if let Some(handler) = handler.as_mut() {
            handler(event);
        }
        *self.crosshair.borrow_mut() = handler;
    }
}

impl RenderingEngine for FakeEngine {
    type Container = ();
    type Chart = usize;
    type Series = usize;
    type PriceLine = u64;

    fn container_size(&self, _container: &()) -> ContainerSize {
        self.size.get()
    }

    fn create_chart(&self, _container: &(), options: &ChartOptions) -> RenderingResult<usize> {
        self.charts_created.set(self.charts_created.get() + 1);
        self.chart_options.borrow_mut().push(options.clone());
        Ok(self.charts_created.get())
    }

    fn add_candlestick_series(&self, _chart: &usize, _options: &SeriesOptions) -> RenderingResult<usize> {
        self.series_added.set(self.series_added.get() + 1);
        Ok(self.series_added.get())
    }

    fn subscribe_crosshair_move(&self, _chart: &usize, handler: CrosshairHandler) {
        *self.crosshair.borrow_mut() = Some(handler);
    }

    fn set_series_data(&self, _series: &usize, bars: &[PriceBar]) {
        self.data_pushes.borrow_mut().push(bars.len());
    }

    fn create_price_line(&self, _series: &usize, spec: &PriceLineSpec) -> RenderingResult<u64> {
        let id = self.next_line.get();
        self.next_line.set(id + 1);
        self.lines_created.set(self.lines_created.get() + 1);
        self.live.borrow_mut().insert(id, spec.clone());
        Ok(id)
    }

    fn remove_price_line(&self, _series: &usize, line: u64) {
        self.lines_removed.set(self.lines_removed.get() + 1);
        self.live.borrow_mut().remove(&line);
    }

    fn set_visible_range(&self, _chart: &usize, range: VisibleRange) {
        self.visible_ranges.borrow_mut().push(range);
    }

    fn resize(&self, _chart: &usize, size: ContainerSize) {
        self.resizes.borrow_mut().push(size);
    }
}

enum TaskKind {
    Once(Box<dyn FnOnce()>),
    Repeating(Box<dyn FnMut()>, Duration),
}

struct Task {
    due: Duration,
    kind: TaskKind,
    alive: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    tasks: Vec<Task>,
}

/// Virtual-time scheduler; tasks only run inside [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Rc<RefCell<Timeline>>,
}

pub struct ManualHandle {
    alive: Rc<Cell<bool>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, delay: Duration, kind: TaskKind) -> ManualHandle {
        let alive = Rc::new(Cell::new(true));
        let mut timeline = self.timeline.borrow_mut();
        let due = timeline.now + delay;
        timeline.tasks.push(Task { due, kind, alive: Rc::clone(&alive) });
        ManualHandle { alive }
    }

    pub fn pending(&self) -> usize {
        self.timeline.borrow().tasks.iter().filter(|task| task.alive.get()).count()
    }

    pub fn advance(&self, by: Duration) {
        let target = self.timeline.borrow().now + by;
        loop {
            let next = {
                let mut timeline = self.timeline.borrow_mut();
                timeline.tasks.retain(|task| task.alive.get());
                let index = timeline
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= target)
                    .min_by_key(|(_, task)| task.due)
                    .map(|(index, _)| index);
                index.map(|index| {
                    let task = timeline.tasks.remove(index);
                    timeline.now = task.due;
                    task
                })
            };
            let Some(task) = next else {
                break;
            };
            match task.kind {
                TaskKind::Once(run) => run(),
                TaskKind::Repeating(mut run, period) => {
                    run();
                    if task.alive.get() {
                        self.timeline.borrow_mut().tasks.push(Task {
                            due: task.due + period,
                            kind: TaskKind::Repeating(run, period),
                            alive: task.alive,
                        });
                    }
                }
            }
        }
        self.timeline.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
        self.push(delay, TaskKind::Once(task))
    }

    fn schedule_repeating(&self, period: Duration, task: Box<dyn FnMut()>) -> ManualHandle {
        self.push(period, TaskKind::Repeating(task, period))
    }
}

pub struct FixedClock {
    pub now_ms: u64,
    pub offset_secs: i64,
}

impl TimeProvider for FixedClock {
    fn current_timestamp(&self) -> u64 {
        self.now_ms
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        timestamp.to_string()
    }

    fn timezone_offset_secs(&self) -> i64 {
        self.offset_secs
    }
}

/// Feed keyed by market name; refresh requests are only counted.
#[derive(Default)]
pub struct FakeFeed {
    series: RefCell<HashMap<String, Rc<[PriceBar]>>>,
    pub refreshes: Cell<usize>,
}

impl FakeFeed {
    pub fn set(&self, market: &str, bars: Vec<PriceBar>) {
        self.series.borrow_mut().insert(market.to_uppercase(), bars.into());
    }
}

impl PriceFeed for FakeFeed {
    fn series(&self, symbol: &Symbol, _period: ChartPeriod) -> Rc<[PriceBar]> {
        self.series.borrow().get(symbol.value()).cloned().unwrap_or_else(|| Rc::from(Vec::new()))
    }

    fn request_refresh(&self) {
        self.refreshes.set(self.refreshes.get() + 1);
    }
}

pub fn registry() -> Rc<StaticTokenRegistry> {
    Rc::new(StaticTokenRegistry::new().with_chain(
        CHAIN,
        vec![
            Token::new("0xeth", "ETH").native(),
            Token::new("0xweth", "WETH").wrapping("ETH"),
            Token::new("0xbtc", "BTC"),
            Token::new("0xusdc", "USDC").stable(),
            Token::new("0xusdt", "USDT").stable(),
            Token::new("0xusdg", "USDG").synthetic_usd(),
        ],
    ))
}

pub fn token(registry: &StaticTokenRegistry, address: &str) -> Rc<Token> {
    registry.token(CHAIN, &TokenAddress::from(address)).expect("fixture token")
}

pub fn bar(time: i64, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    PriceBar::new(Timestamp::new(time), Price::new(open), Price::new(high), Price::new(low), Price::new(close))
}

pub fn hourly_bars(count: i64, start: i64) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let open = 1_800.0 + i as f64 * 10.0;
            bar(start + i * 3_600, open, open + 20.0, open - 15.0, open + 5.0)
        })
        .collect()
}

/// Long on `to_address` with USDC as collateral token.
pub fn long_inputs(registry: &StaticTokenRegistry, to_address: &str) -> ChartInputs {
    ChartInputs::new(CHAIN, TradeMode::Long)
        .with_tokens(Some(token(registry, "0xusdc")), Some(token(registry, to_address)))
}

pub struct Harness {
    pub engine: Rc<FakeEngine>,
    pub scheduler: ManualScheduler,
    pub feed: Rc<FakeFeed>,
    pub registry: Rc<StaticTokenRegistry>,
    pub controller: ChartOverlayController<FakeEngine, ManualScheduler>,
}

pub const NOW_SECS: i64 = 1_700_000_000;

impl Harness {
    pub fn new() -> Self {
        Self::with_config(OverlayConfig::default())
    }

    pub fn with_config(config: OverlayConfig) -> Self {
        let engine = FakeEngine::sized(800, 450);
        let scheduler = ManualScheduler::new();
        let feed = Rc::new(FakeFeed::default());
        let registry = registry();
        let controller = ChartOverlayController::new(
            Rc::clone(&engine),
            scheduler.clone(),
            Rc::clone(&registry) as Rc<dyn TokenRegistry>,
            Rc::new(FixedClock { now_ms: NOW_SECS as u64 * 1_000, offset_secs: 0 }),
            Rc::clone(&feed) as Rc<dyn PriceFeed>,
            config,
            (),
        );
        Self { engine, scheduler, feed, registry, controller }
    }
}
