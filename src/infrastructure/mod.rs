//! Browser adapters.

pub mod lightweight_charts;
pub mod services;
pub mod timers;

pub use lightweight_charts::LightweightChartsEngine;
pub use services::{BrowserTimeProvider, ConsoleLogger};
pub use timers::GlooScheduler;
