use crate::domain::tokens::{ChainId, Token, TokenRegistry, TradeMode};
use crate::domain::trading::{Order, select_orders};
use std::rc::Rc;

struct SelectionKey {
    orders: Rc<[Order]>,
    instrument: Option<Rc<Token>>,
    mode: TradeMode,
    chain_id: ChainId,
}

impl SelectionKey {
    fn matches(&self, orders: &Rc<[Order]>, instrument: Option<&Rc<Token>>, mode: TradeMode, chain_id: ChainId) -> bool {
        let same_instrument = match (&self.instrument, instrument) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        Rc::ptr_eq(&self.orders, orders) && same_instrument && self.mode == mode && self.chain_id == chain_id
    }
}

/// Order selection memoized on the identity of its inputs.
pub struct OverlaySelector {
    key: Option<SelectionKey>,
    selected: Rc<[Order]>,
}

impl Default for OverlaySelector {
    fn default() -> Self {
        Self { key: None, selected: Rc::from(Vec::new()) }
    }
}

impl OverlaySelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected orders and whether they were recomputed.
    pub fn select(
        &mut self,
        orders: &Rc<[Order]>,
        instrument: Option<&Rc<Token>>,
        mode: TradeMode,
        chain_id: ChainId,
        registry: &dyn TokenRegistry,
    ) -> (Rc<[Order]>, bool) {
        if self.key.as_ref().is_some_and(|key| key.matches(orders, instrument, mode, chain_id)) {
            return (Rc::clone(&self.selected), false);
        }
        self.selected = select_orders(orders, instrument.map(Rc::as_ref), mode, chain_id, registry).into();
        self.key = Some(SelectionKey { orders: Rc::clone(orders), instrument: instrument.cloned(), mode, chain_id });
        (Rc::clone(&self.selected), true)
    }
}
