//! Chart aggregate: engine contract, option objects, price lines and readout.

pub mod engine;
pub mod options;
pub mod readout;
pub mod services;
pub mod value_objects;

pub use engine::*;
pub use options::{ChartOptions, SeriesOptions};
pub use readout::*;
pub use services::PriceLineBuilder;
pub use value_objects::*;
