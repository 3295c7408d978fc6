//! Infrastructure layer - adapters for the application ports.
//!
//! This layer provides concrete implementations of the timing ports:
//! - Clock adapter (`SystemClock`)
//! - Scheduler adapter (`ThreadScheduler`)
//! - Deterministic mocks for testing (`MockScheduler`)

pub mod clock;
pub mod mocks;
pub mod scheduler;
