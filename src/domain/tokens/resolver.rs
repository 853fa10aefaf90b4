use super::entities::{ChainId, Token, TokenRegistry};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

/// Trading mode selected in the exchange form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum TradeMode {
    Long,
    Short,
    Swap,
}

impl TradeMode {
    pub fn is_swap(&self) -> bool {
        matches!(self, Self::Swap)
    }
}

/// Picks the token whose chart is shown for the current trade form.
///
/// Returns one of the given `Rc`s (or the registry's), never a fresh
/// allocation, so an unchanged form yields a pointer-identical token.
pub fn resolve_chart_token(
    mode: TradeMode,
    from: Option<&Rc<Token>>,
    to: Option<&Rc<Token>>,
    chain_id: ChainId,
    registry: &dyn TokenRegistry,
) -> Option<Rc<Token>> {
    let (from, to) = (from?, to?);

    if !mode.is_swap() {
        return Some(Rc::clone(to));
    }

    match (from.is_synthetic_usd, to.is_synthetic_usd) {
        (true, true) => return registry.stable_reference(chain_id),
        (true, false) => return Some(Rc::clone(to)),
        (false, true) => return Some(Rc::clone(from)),
        (false, false) => {}
    }

    match (from.is_stable, to.is_stable) {
        (true, false) => Some(Rc::clone(to)),
        (false, true) => Some(Rc::clone(from)),
        _ => Some(Rc::clone(to)),
    }
}
