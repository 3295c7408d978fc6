//! # pacer
//!
//! Call-rate controllers (debounce, throttle) and pure structural data
//! helpers.
//!
//! The crate has two independent families with no shared state:
//!
//! - **Call-rate controllers**: [`Debouncer`] and [`Throttler`] wrap a
//!   target operation and decide, per call, whether to forward it
//!   immediately, defer it, or drop it.
//! - **Structural operations**: [`chunk`], [`flatten`], [`flatten_deep`],
//!   [`compact`], [`difference`], [`intersection`], [`pick`], [`omit`],
//!   [`deep_equal`], and [`deep_clone`]: pure functions over sequences,
//!   mappings, and the [`Value`] tree. Input in, new value out, inputs
//!   never mutated.
//!
//! ## Debouncing
//!
//! A debouncer runs its target once per quiet period, with the arguments
//! from the last call in the burst:
//!
//! ```no_run
//! use pacer::Debouncer;
//! use std::time::Duration;
//!
//! let save = Debouncer::new(Duration::from_millis(500), |doc: String| {
//!     println!("persisting {} bytes", doc.len());
//! });
//!
//! // Rapid edits collapse into one save, 500ms after the last edit.
//! save.invoke("v1".to_string());
//! save.invoke("v2".to_string());
//! save.invoke("v3".to_string());
//! ```
//!
//! ## Throttling
//!
//! A throttler fires on the leading edge and suppresses everything else
//! inside the open window:
//!
//! ```no_run
//! use pacer::Throttler;
//! use std::time::Duration;
//!
//! let report = Throttler::new(Duration::from_secs(1), |pct: u8| {
//!     println!("progress: {pct}%");
//! });
//!
//! for pct in 0..=100 {
//!     report.invoke(pct); // at most one report per second
//! }
//! ```
//!
//! ## Deterministic testing
//!
//! Controllers take their clock and scheduler as injected capabilities, so
//! tests drive them through virtual time with [`MockScheduler`] instead of
//! sleeping:
//!
//! ```
//! use pacer::{Debouncer, MockScheduler, Scheduler};
//! use std::sync::{Arc, Mutex};
//! use std::time::{Duration, Instant};
//!
//! let scheduler = Arc::new(MockScheduler::new(Instant::now()));
//! let fired = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&fired);
//!
//! let debouncer = Debouncer::builder(Duration::from_millis(100), move |v: i32| {
//!     sink.lock().unwrap().push(v);
//! })
//! .with_scheduler(scheduler.clone() as Arc<dyn Scheduler>)
//! .build();
//!
//! debouncer.invoke(1);
//! debouncer.invoke(2);
//! scheduler.advance(Duration::from_millis(100));
//! assert_eq!(*fired.lock().unwrap(), vec![2]);
//! ```
//!
//! ## Structural operations
//!
//! ```
//! use pacer::{chunk, deep_equal, flatten_deep, Value};
//!
//! assert_eq!(
//!     chunk(&[1, 2, 3, 4, 5], 2).unwrap(),
//!     vec![vec![1, 2], vec![3, 4], vec![5]],
//! );
//!
//! let nested = vec![Value::Seq(vec![
//!     Value::Int(1),
//!     Value::Seq(vec![Value::Int(2)]),
//! ])];
//! assert_eq!(flatten_deep(&nested), vec![Value::Int(1), Value::Int(2)]);
//! ```
//!
//! ## Observability
//!
//! Each controller carries shared atomic [`ControllerMetrics`]:
//!
//! ```no_run
//! # use pacer::Throttler;
//! # use std::time::Duration;
//! # let throttler = Throttler::new(Duration::from_secs(1), |_: ()| {});
//! let snapshot = throttler.metrics().snapshot();
//! println!("dropped {} of {} calls", snapshot.dropped, snapshot.invocations);
//! ```
//!
//! Controllers also emit `tracing` events at trace level on every fire,
//! coalesce, and drop; install a `tracing-subscriber` in the host
//! application to see them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Domain layer - pure data transforms
pub mod domain;

// Application layer - controllers and ports
pub mod application;

// Infrastructure layer - clock and scheduler adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    map::{omit, pick},
    seq::{chunk, compact, difference, intersection, ChunkError, Truthy},
    value::{deep_clone, deep_equal, flatten, flatten_deep, Value},
};

pub use application::{
    debouncer::{Debouncer, DebouncerBuilder},
    metrics::{ControllerMetrics, MetricsSnapshot},
    ports::{Clock, Scheduler, Task, TimerHandle},
    throttler::{Throttler, ThrottlerBuilder},
};

pub use infrastructure::{
    clock::SystemClock, mocks::MockScheduler, scheduler::ThreadScheduler,
};
