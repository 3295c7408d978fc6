//! Mock scheduler and clock for testing.

use crate::application::ports::{Clock, Scheduler, Task, TimerHandle};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

struct ScheduledTask {
    due: Instant,
    seq: u64,
    handle: TimerHandle,
    task: Task,
}

struct SchedulerInner {
    now: Instant,
    next_seq: u64,
    queue: Vec<ScheduledTask>,
}

/// Deterministic virtual-time scheduler and clock for testing.
///
/// Implements both `Clock` and `Scheduler` over one shared timeline, so a
/// single instance can drive a controller's clock reads and its deferred
/// fires. Time only moves when a test calls [`advance`](MockScheduler::advance)
/// or [`set`](MockScheduler::set); due tasks run synchronously inside that
/// call, in deadline order (insertion order breaks ties), with the virtual
/// clock positioned at each task's deadline while it runs.
///
/// A task that panics is isolated (the panic is swallowed) so tests can
/// assert that a failing target leaves its controller usable.
///
/// # Examples
///
/// ```
/// use pacer::{MockScheduler, Scheduler};
/// use std::sync::{Arc, Mutex};
/// use std::time::{Duration, Instant};
///
/// let scheduler = MockScheduler::new(Instant::now());
/// let fired = Arc::new(Mutex::new(false));
/// let flag = Arc::clone(&fired);
///
/// scheduler.schedule(Duration::from_secs(5), Box::new(move || {
///     *flag.lock().unwrap() = true;
/// }));
///
/// scheduler.advance(Duration::from_secs(4));
/// assert!(!*fired.lock().unwrap());
///
/// scheduler.advance(Duration::from_secs(1));
/// assert!(*fired.lock().unwrap());
/// ```
///
/// # Thread Safety
///
/// `MockScheduler` is thread-safe and can be cloned to share across
/// threads; all clones share the same timeline and task queue.
#[derive(Clone)]
pub struct MockScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl std::fmt::Debug for MockScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MockScheduler")
            .field("now", &inner.now)
            .field("queued", &inner.queue.len())
            .finish()
    }
}

impl MockScheduler {
    /// Create a mock scheduler whose clock starts at `start`.
    pub fn new(start: Instant) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                now: start,
                next_seq: 0,
                queue: Vec::new(),
            })),
        }
    }

    /// Advance virtual time by `duration`, running every task that comes
    /// due along the way.
    ///
    /// Tasks scheduled *by* a running task are honored too, as long as
    /// their deadlines fall within the advanced range.
    pub fn advance(&self, duration: Duration) {
        let target = {
            let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.now + duration
        };
        self.run_until(target);
    }

    /// Jump virtual time to `instant`, running every task due on the way.
    ///
    /// Moving backwards is not supported; an `instant` in the past only
    /// runs already-due tasks.
    pub fn set(&self, instant: Instant) {
        self.run_until(instant);
    }

    /// Number of scheduled, not-yet-cancelled tasks.
    pub fn pending_count(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .queue
            .iter()
            .filter(|t| !t.handle.is_cancelled())
            .count()
    }

    fn run_until(&self, target: Instant) {
        loop {
            let next = {
                let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

                // Drop cancelled entries eagerly so they never count as due.
                inner.queue.retain(|t| !t.handle.is_cancelled());

                let due_index = inner
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);

                match due_index {
                    Some(i) => {
                        let entry = inner.queue.swap_remove(i);
                        // Run with the clock positioned at the deadline.
                        inner.now = entry.due.max(inner.now);
                        Some(entry.task)
                    }
                    None => {
                        inner.now = target.max(inner.now);
                        None
                    }
                }
            };

            match next {
                // Run outside the lock so the task can schedule or cancel.
                // Panic isolation: a failing task must not poison the
                // queue or abort the rest of the advance.
                Some(task) => {
                    let _ = panic::catch_unwind(AssertUnwindSafe(task));
                }
                None => break,
            }
        }
    }
}

impl Clock for MockScheduler {
    fn now(&self) -> Instant {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).now
    }
}

impl Scheduler for MockScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let due = inner.now + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.queue.push(ScheduledTask {
            due,
            seq,
            handle: handle.clone(),
            task,
        });
        handle
    }
}
