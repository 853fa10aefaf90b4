use wasm_bindgen::prelude::*;

use crate::domain::logging::LogComponent;

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Registers the browser logger and clock before any chart is mounted
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(if cfg!(debug_assertions) {
        infrastructure::ConsoleLogger::new_development()
    } else {
        infrastructure::ConsoleLogger::new_production()
    });
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    crate::log_info!(LogComponent::Presentation("Initialize"), "chart overlay initialized");
}
