//! Orders and positions as annotations: selection and derived prices.

pub mod entities;
pub mod liquidation;
pub mod selector;

pub use entities::*;
pub use liquidation::liquidation_price;
pub use selector::select_orders;
