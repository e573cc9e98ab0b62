//! [`Scheduler`] backed by `setTimeout`.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use pal_assets_core::Scheduler;

use crate::delay_millis;

/// Browser timer source; dropping the returned [`Timeout`] clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle {
        Timeout::new(delay_millis(delay), callback)
    }
}
