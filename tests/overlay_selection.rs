mod common;

use common::{CHAIN, registry, token};
use perp_chart_overlay::domain::tokens::{TokenRegistry, TradeMode};
use perp_chart_overlay::domain::trading::{Order, OrderKind, Side, select_orders};
use quickcheck_macros::quickcheck;

const ADDRESSES: [&str; 4] = ["0xeth", "0xweth", "0xbtc", "0xunknown"];
const KINDS: [OrderKind; 3] = [OrderKind::Swap, OrderKind::Increase, OrderKind::Decrease];

fn orders_from(raw: &[(u8, u8, bool, u16)]) -> Vec<Order> {
    raw.iter()
        .map(|&(token, kind, long, price)| {
            Order::new(
                ADDRESSES[token as usize % ADDRESSES.len()],
                KINDS[kind as usize % KINDS.len()],
                if long { Side::Long } else { Side::Short },
                f64::from(price),
            )
        })
        .collect()
}

#[quickcheck]
fn swap_orders_never_selected(raw: Vec<(u8, u8, bool, u16)>, chart: u8) -> bool {
    let registry = registry();
    let chart = token(&registry, ADDRESSES[chart as usize % 3]);
    let orders = orders_from(&raw);
    select_orders(&orders, Some(&chart), TradeMode::Long, CHAIN, registry.as_ref())
        .iter()
        .all(|order| order.kind != OrderKind::Swap)
}

#[quickcheck]
fn native_chart_selects_exactly_own_and_wrapped(raw: Vec<(u8, u8, bool, u16)>) -> bool {
    let registry = registry();
    let eth = token(&registry, "0xeth");
    let orders = orders_from(&raw);
    let expected: Vec<Order> = orders
        .iter()
        .filter(|order| order.kind != OrderKind::Swap)
        .filter(|order| matches!(order.index_token.value(), "0xeth" | "0xweth"))
        .cloned()
        .collect();
    select_orders(&orders, Some(&eth), TradeMode::Short, CHAIN, registry.as_ref()) == expected
}

#[test]
fn plain_token_chart_matches_by_address_only() {
    let registry = registry();
    let btc = token(&registry, "0xbtc");
    let orders = vec![
        Order::new("0xBTC", OrderKind::Decrease, Side::Short, 30_000.0),
        Order::new("0xeth", OrderKind::Increase, Side::Long, 1_800.0),
        Order::new("0xbtc", OrderKind::Swap, Side::Long, 31_000.0),
    ];
    let selected = select_orders(&orders, Some(&btc), TradeMode::Long, CHAIN, registry.as_ref());
    assert_eq!(selected, vec![orders[0].clone()]);
}

#[test]
fn swap_mode_or_missing_chart_selects_nothing() {
    let registry = registry();
    let eth = token(&registry, "0xeth");
    let orders = vec![Order::new("0xeth", OrderKind::Increase, Side::Long, 1_800.0)];
    assert!(select_orders(&orders, Some(&eth), TradeMode::Swap, CHAIN, registry.as_ref()).is_empty());
    assert!(select_orders(&orders, None, TradeMode::Long, CHAIN, registry.as_ref()).is_empty());
    assert!(registry.token(CHAIN, &"0xeth".into()).is_some());
}
