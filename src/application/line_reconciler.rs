use crate::domain::chart::{PriceLineSpec, RenderingEngine};
use crate::domain::logging::LogComponent;
use crate::log_warn;

/// Owns the price line handles created on the series.
///
/// Every pass removes all handles of the previous pass before creating the
/// new set, so the live set always mirrors the last specs handed in.
pub struct LineReconciler<E: RenderingEngine> {
    series: Option<E::Series>,
    live: Vec<E::PriceLine>,
}

impl<E: RenderingEngine> Default for LineReconciler<E> {
    fn default() -> Self {
        Self { series: None, live: Vec::new() }
    }
}

impl<E: RenderingEngine> LineReconciler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reconcile(&mut self, engine: &E, series: &E::Series, specs: &[PriceLineSpec]) -> usize {
        self.clear(engine);
        self.series = Some(series.clone());
        for spec in specs {
            match engine.create_price_line(series, spec) {
                Ok(handle) => self.live.push(handle),
                Err(e) => {
                    log_warn!(
                        LogComponent::Application("LineReconciler"),
                        "skipping line '{}': {}",
                        spec.title.trim_end(),
                        e
                    );
                }
            }
        }
        self.live.len()
    }

    pub fn clear(&mut self, engine: &E) {
        if let Some(series) = &self.series {
            for line in self.live.drain(..) {
                engine.remove_price_line(series, line);
            }
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
