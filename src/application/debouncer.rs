//! Debounce controller.
//!
//! A [`Debouncer`] wraps a target operation and defers it until a burst of
//! calls has gone quiet for a fixed duration, then runs it once with the
//! arguments from the last call in the burst.

use crate::application::metrics::ControllerMetrics;
use crate::application::ports::{Scheduler, TimerHandle};
use crate::infrastructure::scheduler::ThreadScheduler;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::trace;

/// Timing state owned by one debouncer instance.
///
/// All mutation happens either in [`Debouncer::invoke`] or in the scheduled
/// fire itself, always under the mutex. The generation counter identifies
/// the newest scheduled fire; a stale fire that slips past its cancellation
/// token observes a mismatched generation and does nothing.
struct DebounceState<A> {
    pending: Option<TimerHandle>,
    last_args: Option<A>,
    generation: u64,
}

/// Defers a target operation until calls have been quiet for `wait`.
///
/// Each call to [`invoke`](Debouncer::invoke) cancels the previously
/// scheduled fire, records the call's arguments, and schedules a new fire
/// `wait` from now. The target therefore runs at most once per quiet
/// period, with the latest arguments, exactly `wait` after the burst ends.
///
/// The target's return value is discarded, and a target that panics never
/// corrupts the controller: subsequent calls keep working.
///
/// # Example
/// ```no_run
/// use pacer::Debouncer;
/// use std::time::Duration;
///
/// let debouncer = Debouncer::new(Duration::from_millis(200), |query: String| {
///     println!("searching for {query}");
/// });
///
/// // Only the last call in the burst reaches the target, 200ms later.
/// debouncer.invoke("r".to_string());
/// debouncer.invoke("ru".to_string());
/// debouncer.invoke("rust".to_string());
/// ```
pub struct Debouncer<A: Send + 'static> {
    target: Arc<dyn Fn(A) + Send + Sync>,
    scheduler: Arc<dyn Scheduler>,
    wait: Duration,
    shared: Arc<Mutex<DebounceState<A>>>,
    metrics: ControllerMetrics,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Create a debouncer with the default thread-based scheduler.
    pub fn new(wait: Duration, target: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self::builder(wait, target).build()
    }

    /// Start building a debouncer with a custom scheduler.
    pub fn builder(
        wait: Duration,
        target: impl Fn(A) + Send + Sync + 'static,
    ) -> DebouncerBuilder<A> {
        DebouncerBuilder {
            wait,
            target: Arc::new(target),
            scheduler: None,
        }
    }

    /// Record a call and (re)schedule the deferred fire.
    ///
    /// Cancels any not-yet-fired previous schedule, overwrites the buffered
    /// arguments, and schedules a fresh fire `wait` from this call. With
    /// `wait == 0` the fire is still deferred to the scheduler, never run
    /// synchronously.
    pub fn invoke(&self, args: A) {
        self.metrics.record_invocation();

        // Poison recovery: a panicking target must not wedge the controller.
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = state.pending.take() {
            previous.cancel();
            self.metrics.record_coalesced();
            trace!("debounce coalesced a pending fire");
        }
        state.last_args = Some(args);
        state.generation += 1;
        let generation = state.generation;

        let shared = Arc::clone(&self.shared);
        let target = Arc::clone(&self.target);
        let metrics = self.metrics.clone();
        let handle = self.scheduler.schedule(
            self.wait,
            Box::new(move || {
                let args = {
                    let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                    if state.generation != generation {
                        // A newer call superseded this fire.
                        return;
                    }
                    state.pending = None;
                    state.last_args.take()
                };
                if let Some(args) = args {
                    metrics.record_fire();
                    trace!("debounced fire");
                    target(args);
                }
            }),
        );
        state.pending = Some(handle);
    }

    /// Cancel any pending fire and discard the buffered arguments.
    ///
    /// Safe to call multiple times; a cancelled debouncer accepts new
    /// [`invoke`](Debouncer::invoke) calls normally.
    pub fn cancel(&self) {
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.last_args = None;
        if let Some(pending) = state.pending.take() {
            pending.cancel();
            trace!("debounce cancelled pending fire");
        }
    }

    /// Whether a fire is currently scheduled.
    pub fn is_pending(&self) -> bool {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .is_some()
    }

    /// The quiet period this debouncer waits for.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Get the metrics for this controller.
    pub fn metrics(&self) -> &ControllerMetrics {
        &self.metrics
    }
}

/// Builder for a [`Debouncer`].
pub struct DebouncerBuilder<A: Send + 'static> {
    wait: Duration,
    target: Arc<dyn Fn(A) + Send + Sync>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl<A: Send + 'static> DebouncerBuilder<A> {
    /// Use a custom scheduler instead of the default [`ThreadScheduler`].
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Build the debouncer.
    pub fn build(self) -> Debouncer<A> {
        Debouncer {
            target: self.target,
            scheduler: self
                .scheduler
                .unwrap_or_else(|| Arc::new(ThreadScheduler::new())),
            wait: self.wait,
            shared: Arc::new(Mutex::new(DebounceState {
                pending: None,
                last_args: None,
                generation: 0,
            })),
            metrics: ControllerMetrics::new(),
        }
    }
}
