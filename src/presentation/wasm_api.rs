//! JavaScript entry point for hosts that drive the chart without Leptos.
//!
//! Everything crosses the boundary as JSON strings; token addresses are
//! resolved against the registry handed to the constructor.

use crate::application::{ChartInputs, ChartOverlayController};
use crate::config::OverlayConfig;
use crate::domain::errors::AppError;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{ChartPeriod, PriceBar, PriceFeed, Symbol, validate_series};
use crate::domain::tokens::{ChainId, StaticTokenRegistry, TokenAddress, TokenRegistry, TradeMode};
use crate::domain::trading::{Order, Position, Side};
use crate::infrastructure::{BrowserTimeProvider, GlooScheduler, LightweightChartsEngine};
use crate::{log_info, log_warn};
use gloo::events::EventListener;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type BrowserController = ChartOverlayController<LightweightChartsEngine, GlooScheduler>;

const COMPONENT: LogComponent = LogComponent::Presentation("WasmApi");

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Bars pushed from JS; refresh requests are forwarded to a JS callback.
struct JsPriceFeed {
    bars: RefCell<Rc<[PriceBar]>>,
    on_refresh: js_sys::Function,
}

impl PriceFeed for JsPriceFeed {
    fn series(&self, _symbol: &Symbol, _period: ChartPeriod) -> Rc<[PriceBar]> {
        Rc::clone(&self.bars.borrow())
    }

    fn request_refresh(&self) {
        if let Err(e) = self.on_refresh.call0(&JsValue::NULL) {
            log_warn!(COMPONENT, "refresh callback failed: {:?}", e);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionDto {
    index_token: TokenAddress,
    is_long: bool,
    size: f64,
    collateral: f64,
    average_price: f64,
    #[serde(default)]
    entry_funding_rate: Option<f64>,
    #[serde(default)]
    cumulative_funding_rate: Option<f64>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InputsDto {
    chain_id: ChainId,
    trade_mode: TradeMode,
    #[serde(default)]
    from_token: Option<TokenAddress>,
    #[serde(default)]
    to_token: Option<TokenAddress>,
    #[serde(default)]
    period: ChartPeriod,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    positions: Vec<PositionDto>,
    #[serde(default = "default_true")]
    show_position_lines: bool,
    #[serde(default)]
    sidebar_visible: bool,
}

/// Chart overlay mounted on a DOM element
#[wasm_bindgen]
pub struct ChartOverlayApi {
    controller: Rc<RefCell<BrowserController>>,
    registry: Rc<StaticTokenRegistry>,
    feed: Rc<JsPriceFeed>,
    last_inputs: Option<ChartInputs>,
    _resize_listener: EventListener,
}

#[wasm_bindgen]
impl ChartOverlayApi {
    /// `tokens_json` is `{"<chainId>": [token, ...]}`; `config_json` may be
    /// empty for defaults. `on_refresh` is called every refresh interval.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        tokens_json: &str,
        config_json: &str,
        on_refresh: js_sys::Function,
    ) -> Result<ChartOverlayApi, JsValue> {
        let window = web_sys::window().ok_or_else(|| to_js_error("window not available"))?;
        let container = window
            .document()
            .and_then(|document| document.get_element_by_id(container_id))
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
            .ok_or_else(|| to_js_error(format!("container #{} not found", container_id)))?;

        let registry = Rc::new(StaticTokenRegistry::from_json(tokens_json).map_err(|e| to_js_error(AppError::from(e)))?);
        let config = if config_json.trim().is_empty() {
            OverlayConfig::default()
        } else {
            OverlayConfig::from_json(config_json).map_err(to_js_error)?
        };
        let feed = Rc::new(JsPriceFeed { bars: RefCell::new(Rc::from(Vec::new())), on_refresh });

        let controller = Rc::new(RefCell::new(ChartOverlayController::new(
            Rc::new(LightweightChartsEngine::new()),
            GlooScheduler,
            Rc::clone(&registry) as Rc<dyn TokenRegistry>,
            Rc::new(BrowserTimeProvider::new()),
            Rc::clone(&feed) as Rc<dyn PriceFeed>,
            config,
            container,
        )));

        let resize_listener = {
            let controller = Rc::clone(&controller);
            EventListener::new(&window, "resize", move |_| {
                if let Ok(controller) = controller.try_borrow() {
                    controller.on_window_resize();
                }
            })
        };

        log_info!(COMPONENT, "chart overlay mounted on #{}", container_id);
        Ok(Self { controller, registry, feed, last_inputs: None, _resize_listener: resize_listener })
    }

    /// Replaces the trade-form state and redraws what changed.
    #[wasm_bindgen(js_name = update)]
    pub fn update(&mut self, inputs_json: &str) -> Result<(), JsValue> {
        let dto: InputsDto = serde_json::from_str(inputs_json).map_err(to_js_error)?;
        let inputs = self.inputs_from_dto(dto);
        self.controller.borrow_mut().update(inputs.clone());
        self.last_inputs = Some(inputs);
        Ok(())
    }

    /// Replaces the candles of the charted market, `[{time, open, high, low, close}]`
    /// with strictly increasing times.
    #[wasm_bindgen(js_name = setPriceData)]
    pub fn set_price_data(&mut self, bars_json: &str) -> Result<(), JsValue> {
        let bars: Vec<PriceBar> = serde_json::from_str(bars_json).map_err(to_js_error)?;
        validate_series(&bars).map_err(to_js_error)?;
        *self.feed.bars.borrow_mut() = bars.into();
        if let Some(inputs) = self.last_inputs.clone() {
            self.controller.borrow_mut().update(inputs);
        }
        Ok(())
    }

    /// Host layout moved the chart container; resizes after the debounce.
    #[wasm_bindgen(js_name = onLayoutResize)]
    pub fn on_layout_resize(&self) {
        self.controller.borrow_mut().on_layout_change();
    }

    /// `{"className": ..., "text": ...}` for the hovered or latest candle,
    /// `undefined` without data.
    #[wasm_bindgen(js_name = readout)]
    pub fn readout(&self) -> Option<String> {
        self.controller.borrow().readout().map(|stats| {
            serde_json::json!({ "className": stats.class_name(), "text": stats.to_text() }).to_string()
        })
    }

    #[wasm_bindgen(js_name = liveLineCount)]
    pub fn live_line_count(&self) -> usize {
        self.controller.borrow().live_line_count()
    }
}

impl ChartOverlayApi {
    fn inputs_from_dto(&self, dto: InputsDto) -> ChartInputs {
        let token = |address: Option<TokenAddress>| address.and_then(|a| self.registry.token(dto.chain_id, &a));
        let from_token = token(dto.from_token.clone());
        let to_token = token(dto.to_token.clone());

        let positions: Vec<Position> = dto
            .positions
            .into_iter()
            .filter_map(|p| {
                let Some(index_token) = self.registry.token(dto.chain_id, &p.index_token) else {
                    log_warn!(COMPONENT, "position on unknown token {}", p.index_token.value());
                    return None;
                };
                let side = if p.is_long { Side::Long } else { Side::Short };
                let position = Position::new(index_token, side, p.size, p.collateral, p.average_price);
                Some(match (p.entry_funding_rate, p.cumulative_funding_rate) {
                    (Some(entry), Some(cumulative)) => position.with_funding(entry, cumulative),
                    _ => position,
                })
            })
            .collect();

        // Unchanged lists keep their allocation so the controller sees no change.
        let previous = self.last_inputs.as_ref();
        let orders = match previous {
            Some(last) if *last.orders == dto.orders[..] => Rc::clone(&last.orders),
            _ => dto.orders.into(),
        };
        let positions = match previous {
            Some(last) if *last.positions == positions[..] => Rc::clone(&last.positions),
            _ => positions.into(),
        };

        ChartInputs {
            chain_id: dto.chain_id,
            trade_mode: dto.trade_mode,
            from_token,
            to_token,
            period: dto.period,
            orders,
            positions,
            show_position_lines: dto.show_position_lines,
            sidebar_visible: dto.sidebar_visible,
        }
    }
}
