//! Use-case layer: the overlay controller and the stages it drives.

pub mod binding;
pub mod controller;
pub mod hover;
pub mod line_reconciler;
pub mod overlay;
pub mod scheduler;
pub mod viewport;

pub use controller::{ChartInputs, ChartOverlayController};
pub use hover::{HoverListener, HoverState, HoverTracker};
pub use scheduler::Scheduler;
