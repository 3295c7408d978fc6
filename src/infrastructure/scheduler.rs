//! Thread-based scheduler adapter.
//!
//! Production implementation of the `Scheduler` port: each scheduled fire
//! gets its own named timer thread that sleeps out the delay and then runs
//! the task unless the handle was cancelled in the meantime.

use crate::application::ports::{Scheduler, Task, TimerHandle};
use std::thread;
use std::time::Duration;
use tracing::error;

/// Scheduler that backs every fire with a short-lived timer thread.
///
/// Cancellation is checked after the sleep, so a cancelled timer thread
/// lingers until its deadline and then exits without running the task.
/// Suitable for the handful of in-flight timers a debouncer or trailing
/// throttler produces; not intended as a general-purpose timer wheel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl ThreadScheduler {
    /// Create a new thread scheduler.
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let token = handle.clone();

        let spawned = thread::Builder::new()
            .name("pacer-timer".to_string())
            .spawn(move || {
                thread::sleep(delay);
                if !token.is_cancelled() {
                    task();
                }
            });

        if let Err(e) = spawned {
            // The fire is dropped; callers observe it the same way they
            // would observe a cancelled timer.
            error!(error = %e, "failed to spawn timer thread");
            handle.cancel();
        }

        handle
    }
}
