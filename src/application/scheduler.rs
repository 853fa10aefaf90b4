use std::time::Duration;

/// Timer source for debounced resizes and the refresh interval.
///
/// Dropping a returned handle cancels the task. Tasks run on the same thread
/// that scheduled them.
pub trait Scheduler: 'static {
    type Handle: 'static;

    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    fn schedule_repeating(&self, period: Duration, task: Box<dyn FnMut()>) -> Self::Handle;
}
