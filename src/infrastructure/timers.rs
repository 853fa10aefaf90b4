use crate::application::Scheduler;
use gloo_timers::callback::{Interval, Timeout};
use std::time::Duration;

/// Pending browser timer; dropping it clears the timeout or interval.
pub enum TimerHandle {
    Once(Timeout),
    Repeating(Interval),
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Handle = TimerHandle;

    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::Once(Timeout::new(millis(delay), task))
    }

    fn schedule_repeating(&self, period: Duration, task: Box<dyn FnMut()>) -> TimerHandle {
        TimerHandle::Repeating(Interval::new(millis(period), task))
    }
}
