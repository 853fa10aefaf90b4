mod common;

use common::{Harness, NOW_SECS, hourly_bars, long_inputs};
use perp_chart_overlay::domain::chart::ContainerSize;
use perp_chart_overlay::domain::market_data::{ChartPeriod, Timestamp};
use std::time::Duration;

const MS: Duration = Duration::from_millis(1);

#[test]
fn visible_range_is_set_once_per_instrument() {
    let mut h = Harness::new();
    let mut inputs = long_inputs(&h.registry, "0xeth");
    inputs.period = ChartPeriod::OneHour;

    h.feed.set("ETH_USD", hourly_bars(10, 1_699_900_000));
    h.controller.update(inputs.clone());
    h.feed.set("ETH_USD", hourly_bars(11, 1_699_900_000));
    h.controller.update(inputs.clone());
    h.feed.set("ETH_USD", hourly_bars(12, 1_699_900_000));
    h.controller.update(inputs.clone());

    assert_eq!(*h.engine.data_pushes.borrow(), vec![10, 11, 12]);
    let ranges = h.engine.visible_ranges.borrow().clone();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].to, Timestamp::new(NOW_SECS));
    assert_eq!(ranges[0].from, Timestamp::new(NOW_SECS - 7 * 24 * 3_600 / 2));
}

#[test]
fn instrument_change_places_viewport_again() {
    let mut h = Harness::new();
    h.feed.set("ETH_USD", hourly_bars(5, 1_699_900_000));
    h.feed.set("BTC_USD", hourly_bars(5, 1_699_900_000));

    h.controller.update(long_inputs(&h.registry, "0xeth"));
    h.controller.update(long_inputs(&h.registry, "0xbtc"));
    h.controller.update(long_inputs(&h.registry, "0xbtc"));
    h.controller.update(long_inputs(&h.registry, "0xeth"));

    assert_eq!(h.engine.visible_ranges.borrow().len(), 3);
    assert_eq!(h.engine.charts_created.get(), 1);
}

#[test]
fn wrapped_and_native_share_a_market() {
    let mut h = Harness::new();
    h.feed.set("ETH_USD", hourly_bars(5, 1_699_900_000));
    h.controller.update(long_inputs(&h.registry, "0xeth"));
    h.controller.update(long_inputs(&h.registry, "0xweth"));
    assert_eq!(h.engine.visible_ranges.borrow().len(), 1);
}

#[test]
fn chart_creation_resizes_after_debounce() {
    let mut h = Harness::new();
    h.feed.set("ETH_USD", hourly_bars(5, 1_699_900_000));
    h.controller.update(long_inputs(&h.registry, "0xeth"));
    assert_eq!(h.engine.chart_options.borrow()[0].width, 800);

    h.engine.size.set(ContainerSize::new(640, 400));
    h.scheduler.advance(499 * MS);
    assert!(h.engine.resizes.borrow().is_empty());
    h.scheduler.advance(MS);
    assert_eq!(*h.engine.resizes.borrow(), vec![ContainerSize::new(640, 400)]);
}

#[test]
fn sidebar_toggle_restarts_the_debounce() {
    let mut h = Harness::new();
    h.feed.set("ETH_USD", hourly_bars(5, 1_699_900_000));
    let mut inputs = long_inputs(&h.registry, "0xeth");
    h.controller.update(inputs.clone());
    h.scheduler.advance(600 * MS);
    assert_eq!(h.engine.resizes.borrow().len(), 1);

    inputs.sidebar_visible = true;
    h.controller.update(inputs.clone());
    h.scheduler.advance(300 * MS);
    inputs.sidebar_visible = false;
    h.controller.update(inputs);
    h.scheduler.advance(300 * MS);
    assert_eq!(h.engine.resizes.borrow().len(), 1);

    h.scheduler.advance(200 * MS);
    assert_eq!(h.engine.resizes.borrow().len(), 2);
}

#[test]
fn window_resize_is_immediate_once_bound() {
    let mut h = Harness::new();
    h.controller.on_window_resize();
    assert!(h.engine.resizes.borrow().is_empty());

    h.feed.set("ETH_USD", hourly_bars(5, 1_699_900_000));
    h.controller.update(long_inputs(&h.registry, "0xeth"));
    h.engine.size.set(ContainerSize::new(1024, 500));
    h.controller.on_window_resize();
    assert_eq!(*h.engine.resizes.borrow(), vec![ContainerSize::new(1024, 500)]);
}

#[test]
fn collapsed_container_defers_chart_creation() {
    let mut h = Harness::new();
    h.engine.size.set(ContainerSize::new(0, 0));
    h.feed.set("ETH_USD", hourly_bars(5, 1_699_900_000));
    h.controller.update(long_inputs(&h.registry, "0xeth"));
    assert!(!h.controller.is_chart_created());

    h.engine.size.set(ContainerSize::new(300, 200));
    h.controller.update(long_inputs(&h.registry, "0xeth"));
    assert!(h.controller.is_chart_created());
    assert_eq!(h.engine.visible_ranges.borrow().len(), 1);
}

#[test]
fn refresh_fires_every_minute_until_unmount() {
    let h = Harness::new();
    h.scheduler.advance(Duration::from_secs(59));
    assert_eq!(h.feed.refreshes.get(), 0);
    h.scheduler.advance(Duration::from_secs(1));
    assert_eq!(h.feed.refreshes.get(), 1);
    h.scheduler.advance(Duration::from_secs(120));
    assert_eq!(h.feed.refreshes.get(), 3);

    let Harness { controller, scheduler, feed, .. } = h;
    drop(controller);
    assert_eq!(scheduler.pending(), 0);
    scheduler.advance(Duration::from_secs(600));
    assert_eq!(feed.refreshes.get(), 3);
}

#[test]
fn layout_change_waits_for_the_debounce() {
    let mut h = Harness::new();
    h.controller.on_layout_change();
    h.scheduler.advance(600 * MS);
    assert!(h.engine.resizes.borrow().is_empty());

    h.feed.set("ETH_USD", hourly_bars(5, 1_699_900_000));
    h.controller.update(long_inputs(&h.registry, "0xeth"));
    h.scheduler.advance(600 * MS);
    assert_eq!(h.engine.resizes.borrow().len(), 1);

    h.engine.size.set(ContainerSize::new(700, 380));
    h.controller.on_layout_change();
    h.scheduler.advance(400 * MS);
    h.controller.on_layout_change();
    h.scheduler.advance(300 * MS);
    assert_eq!(h.engine.resizes.borrow().len(), 1);

    h.scheduler.advance(200 * MS);
    assert_eq!(h.engine.resizes.borrow().len(), 2);
    assert_eq!(h.engine.resizes.borrow()[1], ContainerSize::new(700, 380));
}
