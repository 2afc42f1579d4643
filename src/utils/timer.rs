// ============================================================================
// TIMER - One-shot scheduling (gloo_timers in the browser)
// ============================================================================

use std::any::Any;

use gloo_timers::callback::Timeout;

/// Keeps a scheduled task alive. Dropping the handle cancels the task
/// if it has not run yet.
pub struct TimerHandle {
    _inner: Box<dyn Any>,
}

impl TimerHandle {
    pub fn new<T: Any>(inner: T) -> Self {
        Self {
            _inner: Box::new(inner),
        }
    }
}

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        // gloo's Timeout clears itself on drop.
        TimerHandle::new(Timeout::new(delay_ms, task))
    }
}
