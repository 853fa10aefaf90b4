use super::value_objects::PriceLineSpec;
use crate::domain::market_data::Price;
use crate::domain::tokens::{ChainId, TokenRegistry};
use crate::domain::trading::{Order, Position, liquidation_price};

/// Builds the desired price lines for the selected orders and positions.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLineBuilder {
    pub color: String,
    /// Titles are padded to this many characters so the labels line up
    pub title_width: usize,
    pub precision: u32,
}

impl Default for PriceLineBuilder {
    fn default() -> Self {
        Self { color: "#3a3e5e".to_string(), title_width: 15, precision: 2 }
    }
}

impl PriceLineBuilder {
    fn line(&self, price: Price, title: String) -> PriceLineSpec {
        PriceLineSpec {
            price: price.rounded(self.precision),
            color: self.color.clone(),
            title: format!("{:<width$}", title, width = self.title_width),
        }
    }

    pub fn order_line(&self, order: &Order, chain_id: ChainId, registry: &dyn TokenRegistry) -> PriceLineSpec {
        let symbol = registry
            .token(chain_id, &order.index_token)
            .map(|t| t.display_symbol().to_string())
            .unwrap_or_else(|| "?".to_string());
        self.line(order.trigger_price, format!("{} {} {}", order.kind, symbol, order.side))
    }

    /// Entry line, then liquidation line when one can be derived.
    pub fn position_lines(&self, position: &Position) -> Vec<PriceLineSpec> {
        let symbol = &position.index_token.symbol;
        let mut lines = vec![self.line(position.average_price, format!("Open {} {}", symbol, position.side))];
        if let Some(liq) = liquidation_price(position) {
            lines.push(self.line(liq, format!("Liq. {} {}", symbol, position.side)));
        }
        lines
    }

    /// Orders first, then two lines per position.
    pub fn build(
        &self,
        orders: &[Order],
        positions: &[Position],
        chain_id: ChainId,
        registry: &dyn TokenRegistry,
    ) -> Vec<PriceLineSpec> {
        let mut lines: Vec<PriceLineSpec> =
            orders.iter().map(|order| self.order_line(order, chain_id, registry)).collect();
        lines.extend(positions.iter().flat_map(|position| self.position_lines(position)));
        lines
    }
}
