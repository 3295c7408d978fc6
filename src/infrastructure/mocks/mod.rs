//! Mock implementations for testing.
//!
//! This module provides test doubles for the infrastructure adapters,
//! enabling deterministic, sleep-free testing of controller timing. It is
//! compiled unconditionally so downstream crates can drive their own
//! debouncers and throttlers through virtual time in their tests.

pub mod scheduler;

pub use scheduler::MockScheduler;
