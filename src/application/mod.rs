//! Application layer - the call-rate controllers and their ports.
//!
//! This layer holds the timing logic of the library:
//! - Debouncer (quiet-period coalescing)
//! - Throttler (fixed-window suppression)
//! - Controller metrics (observability counters)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement: `Clock` for reading time and `Scheduler` for
//! deferred fires. This keeps the controllers deterministic under test.

pub mod debouncer;
pub mod metrics;
pub mod ports;
pub mod throttler;
