//! `RenderingEngine` over the global `LightweightCharts` bundle.

use crate::domain::chart::{
    ChartOptions, ContainerSize, CrosshairEvent, CrosshairHandler, PriceLineSpec, PricePoint, RenderingEngine,
    SeriesOptions, VisibleRange,
};
use crate::domain::errors::{AppError, RenderingResult};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{Price, PriceBar, Timestamp};
use crate::log_warn;
use crate::time_utils::format_date_time;
use gloo::utils::format::JsValueSerdeExt;
use js_sys::{Map, Object, Reflect};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = LightweightCharts, js_name = createChart, catch)]
    fn create_chart_js(container: &HtmlElement, options: &JsValue) -> Result<ChartApi, JsValue>;

    #[derive(Debug, Clone)]
    pub type ChartApi;

    #[wasm_bindgen(method, js_name = addCandlestickSeries, catch)]
    fn add_candlestick_series(this: &ChartApi, options: &JsValue) -> Result<SeriesApi, JsValue>;

    #[wasm_bindgen(method, js_name = subscribeCrosshairMove)]
    fn subscribe_crosshair_move(this: &ChartApi, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = timeScale)]
    fn time_scale(this: &ChartApi) -> TimeScaleApi;

    #[wasm_bindgen(method)]
    fn resize(this: &ChartApi, width: u32, height: u32);

    #[wasm_bindgen(method)]
    fn remove(this: &ChartApi);

    pub type TimeScaleApi;

    #[wasm_bindgen(method, js_name = setVisibleRange)]
    fn set_visible_range(this: &TimeScaleApi, range: &JsValue);

    #[derive(Debug, Clone)]
    pub type SeriesApi;

    #[wasm_bindgen(method, js_name = setData)]
    fn set_data(this: &SeriesApi, data: &JsValue);

    #[wasm_bindgen(method, js_name = createPriceLine, catch)]
    fn create_price_line(this: &SeriesApi, options: &JsValue) -> Result<PriceLineApi, JsValue>;

    #[wasm_bindgen(method, js_name = removePriceLine)]
    fn remove_price_line(this: &SeriesApi, line: &PriceLineApi);

    pub type PriceLineApi;
}

struct ChartInner {
    api: ChartApi,
    /// Registration order, used to pick the first hovered series
    series: Rc<RefCell<Vec<JsValue>>>,
    callbacks: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
    _time_formatter: Closure<dyn Fn(f64) -> String>,
}

impl Drop for ChartInner {
    fn drop(&mut self) {
        self.api.remove();
    }
}

/// Chart handle. The JS chart is removed when the last clone goes away.
#[derive(Clone)]
pub struct LwChart(Rc<ChartInner>);

fn js_error(context: &str, err: JsValue) -> AppError {
    AppError::RenderingError(format!("{}: {:?}", context, err))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> RenderingResult<JsValue> {
    JsValue::from_serde(value).map_err(|e| AppError::RenderingError(e.to_string()))
}

fn price_point(value: &JsValue) -> Option<PricePoint> {
    let field = |name: &str| Reflect::get(value, &JsValue::from_str(name)).ok()?.as_f64().map(Price::new);
    Some(PricePoint { open: field("open")?, high: field("high")?, low: field("low")?, close: field("close")? })
}

/// Reads a crosshair move parameter. `series_keys` lists the series in the
/// order they were added; entries of `seriesPrices` are taken in that order.
pub fn read_crosshair(param: &JsValue, series_keys: &[JsValue]) -> CrosshairEvent {
    let time = Reflect::get(param, &JsValue::from_str("time")).ok().and_then(|t| t.as_f64());
    let Some(time) = time else {
        return CrosshairEvent::left();
    };
    let points = Reflect::get(param, &JsValue::from_str("seriesPrices"))
        .ok()
        .and_then(|prices| prices.dyn_into::<Map>().ok())
        .map(|prices| series_keys.iter().filter_map(|key| price_point(&prices.get(key))).collect())
        .unwrap_or_default();
    CrosshairEvent::at(Timestamp::new(time as i64), points)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LightweightChartsEngine;

impl LightweightChartsEngine {
    pub fn new() -> Self {
        Self
    }
}

impl RenderingEngine for LightweightChartsEngine {
    type Container = HtmlElement;
    type Chart = LwChart;
    type Series = SeriesApi;
    type PriceLine = PriceLineApi;

    fn container_size(&self, container: &HtmlElement) -> ContainerSize {
        ContainerSize::new(container.offset_width().max(0) as u32, container.offset_height().max(0) as u32)
    }

    fn create_chart(&self, container: &HtmlElement, options: &ChartOptions) -> RenderingResult<LwChart> {
        let js_options = to_js(options)?;
        let time_formatter = Closure::wrap(Box::new(|time: f64| format_date_time(time as i64)) as Box<dyn Fn(f64) -> String>);
        let localization = Object::new();
        Reflect::set(&localization, &JsValue::from_str("timeFormatter"), time_formatter.as_ref())
            .and_then(|_| Reflect::set(&js_options, &JsValue::from_str("localization"), &localization))
            .map_err(|e| js_error("chart options", e))?;

        let api = create_chart_js(container, &js_options).map_err(|e| js_error("createChart", e))?;
        Ok(LwChart(Rc::new(ChartInner {
            api,
            series: Rc::new(RefCell::new(Vec::new())),
            callbacks: RefCell::new(Vec::new()),
            _time_formatter: time_formatter,
        })))
    }

    fn add_candlestick_series(&self, chart: &LwChart, options: &SeriesOptions) -> RenderingResult<SeriesApi> {
        let series = chart.0.api.add_candlestick_series(&to_js(options)?).map_err(|e| js_error("addCandlestickSeries", e))?;
        chart.0.series.borrow_mut().push(series.clone().into());
        Ok(series)
    }

    fn subscribe_crosshair_move(&self, chart: &LwChart, mut handler: CrosshairHandler) {
        let series = Rc::clone(&chart.0.series);
        let callback = Closure::wrap(Box::new(move |param: JsValue| {
            let event = read_crosshair(&param, &series.borrow());
            handler(event);
        }) as Box<dyn FnMut(JsValue)>);
        chart.0.api.subscribe_crosshair_move(callback.as_ref().unchecked_ref());
        chart.0.callbacks.borrow_mut().push(callback);
    }

    fn set_series_data(&self, series: &SeriesApi, bars: &[PriceBar]) {
        match to_js(bars) {
            Ok(data) => series.set_data(&data),
            Err(e) => {
                log_warn!(LogComponent::Infrastructure("LightweightCharts"), "dropping {} bars: {}", bars.len(), e);
            }
        }
    }

    fn create_price_line(&self, series: &SeriesApi, spec: &PriceLineSpec) -> RenderingResult<PriceLineApi> {
        series.create_price_line(&to_js(spec)?).map_err(|e| js_error("createPriceLine", e))
    }

    fn remove_price_line(&self, series: &SeriesApi, line: PriceLineApi) {
        series.remove_price_line(&line);
    }

    fn set_visible_range(&self, chart: &LwChart, range: VisibleRange) {
        match to_js(&range) {
            Ok(range) => chart.0.api.time_scale().set_visible_range(&range),
            Err(e) => {
                log_warn!(LogComponent::Infrastructure("LightweightCharts"), "visible range not applied: {}", e);
            }
        }
    }

    fn resize(&self, chart: &LwChart, size: ContainerSize) {
        chart.0.api.resize(size.width, size.height);
    }
}
