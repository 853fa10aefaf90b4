pub mod chart;
pub mod errors;
pub mod logging;
pub mod market_data;
pub mod rewards;
pub mod tokens;
pub mod trading;
