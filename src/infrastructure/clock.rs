//! Wall-clock adapter.
//!
//! Production implementation of the `Clock` port. Controllers built
//! without an explicit clock read monotonic time through `SystemClock`;
//! tests swap in `MockScheduler` (see `crate::infrastructure::mocks`),
//! which serves virtual time through the same port.

use crate::application::ports::Clock;
use std::time::Instant;

/// The `Clock` a throttler uses unless the builder is given another one.
///
/// Reads are monotonic (`Instant::now()`), so an open window can never
/// appear to close early because the host clock stepped backwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
