//! Observability metrics for call-rate controllers.
//!
//! Provides counters describing controller behavior for monitoring and
//! debugging: how many calls arrived, how many reached the target, and how
//! many were coalesced or dropped along the way.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking controller activity.
///
/// All counters use atomic operations for thread-safe updates and reads.
/// Cloning is cheap and shares the underlying counters, so a controller and
/// its caller observe the same numbers.
#[derive(Debug, Clone, Default)]
pub struct ControllerMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Total calls to the controller's entry point
    invocations: AtomicU64,
    /// Total times the target operation actually ran
    fires: AtomicU64,
    /// Debounce: pending fires replaced by a newer call
    coalesced: AtomicU64,
    /// Throttle: calls discarded inside an open window
    dropped: AtomicU64,
}

impl ControllerMetrics {
    /// Create a new metrics tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_invocation(&self) {
        self.inner.invocations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fire(&self) {
        self.inner.fires.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_coalesced(&self) {
        self.inner.coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.inner.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Total calls to the controller's entry point.
    pub fn invocations(&self) -> u64 {
        self.inner.invocations.load(Ordering::Relaxed)
    }

    /// Total times the target operation ran.
    pub fn fires(&self) -> u64 {
        self.inner.fires.load(Ordering::Relaxed)
    }

    /// Pending fires replaced by a newer call (debounce).
    pub fn coalesced(&self) -> u64 {
        self.inner.coalesced.load(Ordering::Relaxed)
    }

    /// Calls discarded inside an open window (throttle).
    pub fn dropped(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    /// Get a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            invocations: self.invocations(),
            fires: self.fires(),
            coalesced: self.coalesced(),
            dropped: self.dropped(),
        }
    }

    /// Reset all counters to zero.
    ///
    /// Useful for testing or when starting a new monitoring period.
    pub fn reset(&self) {
        self.inner.invocations.store(0, Ordering::Relaxed);
        self.inner.fires.store(0, Ordering::Relaxed);
        self.inner.coalesced.store(0, Ordering::Relaxed);
        self.inner.dropped.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of controller metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total calls to the controller's entry point
    pub invocations: u64,
    /// Total times the target operation ran
    pub fires: u64,
    /// Pending fires replaced by a newer call
    pub coalesced: u64,
    /// Calls discarded inside an open window
    pub dropped: u64,
}

impl MetricsSnapshot {
    /// Ratio of dropped calls to invocations (0.0 to 1.0).
    ///
    /// Returns 0.0 if no calls have been made.
    pub fn drop_rate(&self) -> f64 {
        if self.invocations == 0 {
            0.0
        } else {
            self.dropped as f64 / self.invocations as f64
        }
    }
}
