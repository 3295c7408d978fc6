//! Throttle controller.
//!
//! A [`Throttler`] wraps a target operation and permits it to run at most
//! once per fixed window. The default policy is leading-edge-only: the
//! first call fires immediately and opens the window; calls landing inside
//! an open window are dropped outright. A trailing-edge variant can be
//! enabled through the builder as an alternative configuration.

use crate::application::metrics::ControllerMetrics;
use crate::application::ports::{Clock, Scheduler, TimerHandle};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::scheduler::ThreadScheduler;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::trace;

/// Window state owned by one throttler instance.
///
/// `pending` and `last_args` are only used by the trailing-edge variant.
struct ThrottleState<A> {
    window_start: Option<Instant>,
    pending: Option<TimerHandle>,
    last_args: Option<A>,
    generation: u64,
}

/// Permits a target operation at most once per `limit` window.
///
/// Under the default leading-edge policy, [`invoke`](Throttler::invoke)
/// fires the target synchronously when no window is open and opens a window
/// of length `limit`; every call inside an open window is a no-op whose
/// arguments are discarded. Once `limit` has elapsed the next call fires
/// immediately again.
///
/// With [`trailing_edge`](ThrottlerBuilder::trailing_edge) enabled, calls
/// inside an open window are buffered instead of dropped: the latest
/// arguments fire once at the end of the window, and that fire re-opens
/// the window.
///
/// # Example
/// ```no_run
/// use pacer::Throttler;
/// use std::time::Duration;
///
/// let throttler = Throttler::new(Duration::from_secs(1), |pos: (u32, u32)| {
///     println!("scroll position {pos:?}");
/// });
///
/// throttler.invoke((0, 10));  // fires immediately
/// throttler.invoke((0, 20));  // inside the window: dropped
/// ```
pub struct Throttler<A: Send + 'static> {
    target: Arc<dyn Fn(A) + Send + Sync>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
    limit: Duration,
    trailing: bool,
    shared: Arc<Mutex<ThrottleState<A>>>,
    metrics: ControllerMetrics,
}

impl<A: Send + 'static> Throttler<A> {
    /// Create a leading-edge throttler with the system clock.
    pub fn new(limit: Duration, target: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self::builder(limit, target).build()
    }

    /// Start building a throttler with a custom clock, scheduler, or edge
    /// policy.
    pub fn builder(
        limit: Duration,
        target: impl Fn(A) + Send + Sync + 'static,
    ) -> ThrottlerBuilder<A> {
        ThrottlerBuilder {
            limit,
            target: Arc::new(target),
            clock: None,
            scheduler: None,
            trailing: false,
        }
    }

    /// Run the target now if no window is open, otherwise drop (or, in
    /// trailing mode, buffer) the call.
    ///
    /// The leading fire happens synchronously on the caller's timeline,
    /// outside the state lock; a trailing fire happens on the scheduler.
    pub fn invoke(&self, args: A) {
        self.metrics.record_invocation();
        let now = self.clock.now();

        // Poison recovery: a panicking target must not wedge the controller.
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);

        let elapsed = state
            .window_start
            .map(|start| now.saturating_duration_since(start));
        let window_open = matches!(elapsed, Some(e) if e < self.limit);

        if !window_open {
            // A trailing fire scheduled for the previous window may still
            // be waiting on a lagging timer. This call supersedes it: drop
            // the buffered arguments and invalidate the stale task so it
            // cannot fire into the new window.
            if self.trailing {
                state.generation += 1;
                state.last_args = None;
                if let Some(pending) = state.pending.take() {
                    pending.cancel();
                }
            }
            state.window_start = Some(now);
            drop(state);
            self.metrics.record_fire();
            trace!("throttle leading fire");
            (self.target)(args);
            return;
        }

        if !self.trailing {
            self.metrics.record_dropped();
            trace!("throttle dropped call inside open window");
            return;
        }

        // Trailing mode: buffer the latest arguments and make sure exactly
        // one fire is scheduled for the end of the window.
        if state.last_args.replace(args).is_some() {
            self.metrics.record_coalesced();
        }
        if state.pending.is_none() {
            let remaining = self.limit.saturating_sub(elapsed.unwrap_or(Duration::ZERO));
            state.generation += 1;
            let generation = state.generation;

            let shared = Arc::clone(&self.shared);
            let target = Arc::clone(&self.target);
            let clock = Arc::clone(&self.clock);
            let metrics = self.metrics.clone();
            let handle = self.scheduler.schedule(
                remaining,
                Box::new(move || {
                    let args = {
                        let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                        if state.generation != generation {
                            return;
                        }
                        state.pending = None;
                        let args = state.last_args.take();
                        if args.is_some() {
                            // The trailing fire re-opens the window.
                            state.window_start = Some(clock.now());
                        }
                        args
                    };
                    if let Some(args) = args {
                        metrics.record_fire();
                        trace!("throttle trailing fire");
                        target(args);
                    }
                }),
            );
            state.pending = Some(handle);
        }
    }

    /// Cancel any pending trailing fire and discard buffered arguments.
    ///
    /// Safe to call multiple times. The current window, if one is open,
    /// stays open: cancellation is a teardown of scheduled work, not a
    /// reset of the rate limit.
    pub fn cancel(&self) {
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.last_args = None;
        if let Some(pending) = state.pending.take() {
            pending.cancel();
            trace!("throttle cancelled trailing fire");
        }
    }

    /// Whether a call arriving now would be suppressed.
    pub fn is_window_open(&self) -> bool {
        let state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        match state.window_start {
            Some(start) => self.clock.now().saturating_duration_since(start) < self.limit,
            None => false,
        }
    }

    /// The window length of this throttler.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Get the metrics for this controller.
    pub fn metrics(&self) -> &ControllerMetrics {
        &self.metrics
    }
}

/// Builder for a [`Throttler`].
pub struct ThrottlerBuilder<A: Send + 'static> {
    limit: Duration,
    target: Arc<dyn Fn(A) + Send + Sync>,
    clock: Option<Arc<dyn Clock>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    trailing: bool,
}

impl<A: Send + 'static> ThrottlerBuilder<A> {
    /// Use a custom clock instead of the default [`SystemClock`].
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a custom scheduler instead of the default [`ThreadScheduler`].
    ///
    /// The scheduler is only exercised when trailing-edge mode is enabled.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Buffer calls arriving inside an open window and fire the latest one
    /// at the end of the window, instead of dropping them.
    pub fn trailing_edge(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Build the throttler.
    pub fn build(self) -> Throttler<A> {
        Throttler {
            target: self.target,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock::new())),
            scheduler: self
                .scheduler
                .unwrap_or_else(|| Arc::new(ThreadScheduler::new())),
            limit: self.limit,
            trailing: self.trailing,
            shared: Arc::new(Mutex::new(ThrottleState {
                window_start: None,
                pending: None,
                last_args: None,
                generation: 0,
            })),
            metrics: ControllerMetrics::new(),
        }
    }
}
