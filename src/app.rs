use leptos::html::Div;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo_timers::callback::Interval;

use crate::{
    application::{ChartInputs, ChartOverlayController},
    config::OverlayConfig,
    domain::{
        chart::CandleStats,
        logging::{LogComponent, TimeProvider},
        market_data::{ChartPeriod, PriceBar, PriceFeed, Symbol},
        rewards::{AccountBanner, RewardsAction, RewardsInputs, summarize},
        tokens::TokenRegistry,
    },
    infrastructure::{BrowserTimeProvider, GlooScheduler, LightweightChartsEngine},
    log_debug,
};

type BrowserController = ChartOverlayController<LightweightChartsEngine, GlooScheduler>;

/// Price feed backed by Leptos signals.
///
/// Holds the bars of the market currently on screen; the host swaps them in
/// with [`SignalPriceFeed::set_bars`] and watches
/// [`SignalPriceFeed::refresh_requests`] to reload. Reading the series inside
/// an effect subscribes that effect to new data.
#[derive(Clone, Copy)]
pub struct SignalPriceFeed {
    bars: RwSignal<Rc<[PriceBar]>>,
    refresh_requests: RwSignal<u64>,
}

impl SignalPriceFeed {
    pub fn new() -> Self {
        Self { bars: create_rw_signal(Rc::from(Vec::new())), refresh_requests: create_rw_signal(0) }
    }

    pub fn set_bars(&self, bars: Vec<PriceBar>) {
        self.bars.set(bars.into());
    }

    pub fn refresh_requests(&self) -> Signal<u64> {
        self.refresh_requests.into()
    }
}

impl Default for SignalPriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceFeed for SignalPriceFeed {
    fn series(&self, _symbol: &Symbol, _period: ChartPeriod) -> Rc<[PriceBar]> {
        self.bars.get()
    }

    fn request_refresh(&self) {
        self.refresh_requests.update(|n| *n += 1);
    }
}

/// Candlestick chart of the trade form's market with order and position lines.
#[component]
pub fn ExchangeChart(
    #[prop(into)] inputs: Signal<ChartInputs>,
    registry: Rc<dyn TokenRegistry>,
    feed: Rc<dyn PriceFeed>,
    #[prop(optional)] config: OverlayConfig,
) -> impl IntoView {
    let chart_ref = create_node_ref::<Div>();
    let stats = create_rw_signal(None::<CandleStats>);
    let hover_ticks = create_rw_signal(0u64);
    let has_instrument = create_rw_signal(false);
    let controller: Rc<RefCell<Option<BrowserController>>> = Rc::new(RefCell::new(None));

    create_effect({
        let controller = Rc::clone(&controller);
        move |_| {
            let inputs = inputs.get();
            let Some(element) = chart_ref.get() else {
                return;
            };
            let mut slot = controller.borrow_mut();
            let controller = slot.get_or_insert_with(|| {
                let container: web_sys::HtmlElement = (*element).clone().into();
                let mounted = ChartOverlayController::new(
                    Rc::new(LightweightChartsEngine::new()),
                    GlooScheduler,
                    Rc::clone(&registry),
                    Rc::new(BrowserTimeProvider::new()),
                    Rc::clone(&feed),
                    config.clone(),
                    container,
                );
                mounted.set_hover_listener(Box::new(move |_| hover_ticks.update(|n| *n += 1)));
                mounted
            });
            controller.update(inputs);
            has_instrument.set(controller.instrument().is_some());
            stats.set(controller.readout());
        }
    });

    // Hover changes arrive from the engine callback, outside of `update`.
    create_effect({
        let controller = Rc::clone(&controller);
        move |_| {
            hover_ticks.track();
            if let Ok(slot) = controller.try_borrow() {
                if let Some(controller) = slot.as_ref() {
                    stats.set(controller.readout());
                }
            }
        }
    });

    let resize_listener = web_sys::window().map(|window| {
        let controller = Rc::clone(&controller);
        EventListener::new(&window, "resize", move |_| {
            if let Ok(slot) = controller.try_borrow() {
                if let Some(controller) = slot.as_ref() {
                    controller.on_window_resize();
                }
            }
        })
    });

    on_cleanup(move || {
        drop(resize_listener);
        controller.borrow_mut().take();
        log_debug!(LogComponent::Presentation("ExchangeChart"), "chart unmounted");
    });

    view! {
        <div
            class="LightweightChart-container"
            style:display=move || if has_instrument.get() { "block" } else { "none" }
        >
            <div class="LightweightChart" node_ref=chart_ref></div>
            <div class="CandleStats">
                {move || stats.get().map(|stats| view! { <CandleStatsView stats=stats/> })}
            </div>
        </div>
    }
}

#[component]
fn CandleStatsView(stats: CandleStats) -> impl IntoView {
    view! {
        <div class=stats.class_name()>
            {stats
                .entries()
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <span class="ExchangeChart-bottom-stats-label">{label}</span>
                        <span class="ExchangeChart-bottom-stats-value">{value}</span>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Personal rewards card of the rewards page
#[component]
pub fn RewardsCard(
    #[prop(into)] inputs: Signal<RewardsInputs>,
    #[prop(into)] on_connect: Callback<()>,
    #[prop(into)] on_claim: Callback<()>,
) -> impl IntoView {
    let clock = BrowserTimeProvider::new();
    let now = create_rw_signal(clock.now_secs());
    let ticker = Interval::new(60_000, move || now.set(clock.now_secs()));
    on_cleanup(move || drop(ticker));

    let summary = create_memo(move |_| summarize(&inputs.get(), now.get()));
    let text = move |pick: fn(&crate::domain::rewards::RewardsSummary) -> String| move || summary.with(pick);

    view! {
        <div class="PersonalRewards" class:hidden=move || summary.with(|s| s.hidden)>
            <div class="AccountBanner App-card">
                {move || match summary.with(|s| s.banner.clone()) {
                    AccountBanner::Connected { title, .. } => view! {
                        <div class="AccountBanner-addresses">
                            <div class="App-card-title">{title}</div>
                            <div class="AccountBanner-shortened-address">"Wallet address"</div>
                        </div>
                    }
                    .into_view(),
                    AccountBanner::Disconnected => view! {
                        <div class="AccountBanner-addresses">
                            <div class="App-card-title">"Connect Wallet"</div>
                            <div class="AccountBanner-shortened-address">"Wallet not connected"</div>
                        </div>
                    }
                    .into_view(),
                }}
                <div class="App-card-row">
                    <div class="label">"Total Volume Traded"</div>
                    <div>{text(|s| s.total_volume.clone())}</div>
                </div>
                <div class="App-card-row">
                    <div class="label">"Total Rewards"</div>
                    <div>{text(|s| s.total_rewards.clone())}</div>
                </div>
                <div class="App-card-row">
                    <div class="label">"Unclaimed Rewards"</div>
                    <div>{text(|s| s.unclaimed_rewards.clone())}</div>
                </div>
            </div>
            <div class="RewardsData App-card">
                <div class="App-card-title">"Rewards data"</div>
                {move || summary.with(|s| s.countdown.clone()).map(|left| view! {
                    <div class="RewardsWeek-next">"Next rewards in " <span class="RewardsWeek-countdown">{left}</span></div>
                })}
                <div class="RewardsData-box">
                    <div class="RewardsData-box-title">"Volume Traded"</div>
                    <div class="large">{text(|s| s.week_volume.clone())}</div>
                </div>
                <div class="RewardsData-box claimable">
                    <div class="RewardsData-box-title">"Claimable Rewards"</div>
                    <div class="large">{text(|s| s.week_reward.clone())}</div>
                    <span>" " {text(|s| s.week_reward_usd.clone())}</span>
                </div>
                {move || match summary.with(|s| s.action.clone()) {
                    RewardsAction::ConnectWallet => view! {
                        <button class="App-cta large" on:click=move |_| on_connect.call(())>"Connect Wallet"</button>
                    }
                    .into_view(),
                    RewardsAction::WeekEndsIn(left) => view! {
                        <button class="App-cta large" disabled=true>{format!("Week ends in {}", left)}</button>
                    }
                    .into_view(),
                    RewardsAction::ClaimEth => view! {
                        <button class="App-cta large" on:click=move |_| on_claim.call(())>"Claim ETH"</button>
                    }
                    .into_view(),
                }}
            </div>
        </div>
    }
}
