//! Ports (interfaces) for the application layer.
//!
//! The controllers depend on two injected capabilities: a clock and a
//! scheduler. Infrastructure adapters implement these ports
//! (`SystemClock`/`ThreadScheduler` in production, `MockScheduler` in
//! tests), which keeps controller timing logic deterministic and testable
//! without wall-clock sleeps.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Port for obtaining current time.
///
/// This abstraction allows the application layer to work with time
/// without depending on system clock implementation details.
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// A deferred unit of work handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Port for deferred execution.
///
/// A scheduler runs a task once, `delay` after it was scheduled, unless the
/// returned handle is cancelled first. Each call schedules an independent
/// fire; the scheduler never coalesces or reorders tasks on its own.
pub trait Scheduler: Send + Sync + Debug {
    /// Schedule `task` to run after `delay`.
    ///
    /// Returns a handle that can cancel the fire before it happens.
    /// Cancelling after the task has run is a no-op.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

/// Cancellation token for a scheduled fire.
///
/// Cloning the handle shares the same token; cancelling any clone cancels
/// the fire. Cancellation is idempotent and never blocks.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Create a live (not yet cancelled) handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the scheduled fire. Safe to call multiple times.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether the fire has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_handle_starts_live() {
        let handle = TimerHandle::new();
        assert!(!handle.is_cancelled());
    }

    #[test]
    fn test_timer_handle_cancel_is_idempotent() {
        let handle = TimerHandle::new();
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_timer_handle_clones_share_state() {
        let handle = TimerHandle::new();
        let clone = handle.clone();
        clone.cancel();
        assert!(handle.is_cancelled());
    }
}
