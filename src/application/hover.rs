use crate::domain::chart::{CrosshairEvent, CrosshairHandler, HoverCandle};
use std::cell::RefCell;
use std::rc::Rc;

pub type HoverListener = Box<dyn FnMut(Option<Rc<HoverCandle>>)>;

/// Candle currently under the crosshair.
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<Rc<HoverCandle>>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a crosshair move into the hover state, returns whether it changed.
    ///
    /// Only the first series point is read. A move that lands on the time
    /// already hovered keeps the stored candle, whatever its prices.
    pub fn apply(&mut self, event: &CrosshairEvent) -> bool {
        let Some(time) = event.time else {
            return self.current.take().is_some();
        };
        let Some(point) = event.series_prices.first() else {
            return false;
        };
        if self.current.as_ref().is_some_and(|candle| candle.time == time) {
            return false;
        }
        self.current = Some(Rc::new(HoverCandle::new(time, point)));
        true
    }

    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<Rc<HoverCandle>> {
        self.current.clone()
    }
}

/// Hover tracker shared between the controller and the engine callback.
#[derive(Clone, Default)]
pub struct HoverState {
    tracker: Rc<RefCell<HoverTracker>>,
    listener: Rc<RefCell<Option<HoverListener>>>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Rc<HoverCandle>> {
        self.tracker.borrow().current()
    }

    /// The listener sees every change, including clears. It must not
    /// replace itself from inside the call.
    pub fn set_listener(&self, listener: HoverListener) {
        *self.listener.borrow_mut() = Some(listener);
    }

    pub fn apply(&self, event: &CrosshairEvent) {
        let changed = self.tracker.borrow_mut().apply(event);
        if changed {
            self.notify();
        }
    }

    pub fn clear(&self) {
        let changed = self.tracker.borrow_mut().clear();
        if changed {
            self.notify();
        }
    }

    pub fn crosshair_handler(&self) -> CrosshairHandler {
        let state = self.clone();
        Box::new(move |event| state.apply(&event))
    }

    fn notify(&self) {
        let current = self.current();
        if let Some(listener) = self.listener.borrow_mut().as_mut() {
            listener(current);
        }
    }
}
