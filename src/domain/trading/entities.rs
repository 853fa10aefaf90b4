use crate::domain::market_data::Price;
use crate::domain::tokens::{Token, TokenAddress};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Side {
    #[display(fmt = "Long")]
    Long,
    #[display(fmt = "Short")]
    Short,
}

impl Side {
    pub fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }
}

/// Kind of a pending trigger order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum OrderKind {
    #[display(fmt = "Swap")]
    Swap,
    #[display(fmt = "Inc.")]
    Increase,
    #[display(fmt = "Dec.")]
    Decrease,
}

/// Pending order as listed for the connected account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub index_token: TokenAddress,
    pub kind: OrderKind,
    pub side: Side,
    pub trigger_price: Price,
}

impl Order {
    pub fn new(index_token: &str, kind: OrderKind, side: Side, trigger_price: f64) -> Self {
        Self { index_token: TokenAddress::from(index_token), kind, side, trigger_price: Price::new(trigger_price) }
    }
}

/// Open position. Amounts are in USD.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub index_token: Rc<Token>,
    pub side: Side,
    pub size: f64,
    pub collateral: f64,
    pub average_price: Price,
    /// Funding rates in 1e-6 units; fees only accrue when both are known
    pub entry_funding_rate: Option<f64>,
    pub cumulative_funding_rate: Option<f64>,
}

impl Position {
    pub fn new(index_token: Rc<Token>, side: Side, size: f64, collateral: f64, average_price: f64) -> Self {
        Self {
            index_token,
            side,
            size,
            collateral,
            average_price: Price::new(average_price),
            entry_funding_rate: None,
            cumulative_funding_rate: None,
        }
    }

    pub fn with_funding(mut self, entry: f64, cumulative: f64) -> Self {
        self.entry_funding_rate = Some(entry);
        self.cumulative_funding_rate = Some(cumulative);
        self
    }
}
