use super::entities::{Order, OrderKind};
use crate::domain::tokens::{ChainId, Token, TokenRegistry, TradeMode};

/// Whether an order on `order_token` belongs on the chart of `chart_token`.
///
/// Native and wrapped native share one chart.
fn order_matches(chart_token: &Token, order_token: Option<&Token>, order: &Order) -> bool {
    if order.index_token == chart_token.address {
        return true;
    }
    let Some(order_token) = order_token else {
        return false;
    };
    (chart_token.is_native && order_token.is_wrapped) || (chart_token.is_wrapped && order_token.is_native)
}

/// Orders to draw on the chart of `chart_token`, in input order.
///
/// Swap orders are never shown: a swap between two volatile tokens has no
/// single chart it belongs to.
pub fn select_orders(
    orders: &[Order],
    chart_token: Option<&Token>,
    mode: TradeMode,
    chain_id: ChainId,
    registry: &dyn TokenRegistry,
) -> Vec<Order> {
    let Some(chart_token) = chart_token else {
        return Vec::new();
    };
    if mode.is_swap() {
        return Vec::new();
    }

    orders
        .iter()
        .filter(|order| order.kind != OrderKind::Swap)
        .filter(|order| {
            let order_token = registry.token(chain_id, &order.index_token);
            order_matches(chart_token, order_token.as_deref(), order)
        })
        .cloned()
        .collect()
}
