//! Timing and invocation-count guarantees of the debouncer, driven
//! through virtual time.

use pacer::{Debouncer, MockScheduler, Scheduler};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn recording_debouncer(
    wait: Duration,
    scheduler: &Arc<MockScheduler>,
) -> (Debouncer<u32>, Arc<Mutex<Vec<(u32, Instant)>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let clock = Arc::clone(scheduler);
    let debouncer = Debouncer::builder(wait, move |v: u32| {
        use pacer::Clock;
        sink.lock().unwrap().push((v, clock.now()));
    })
    .with_scheduler(Arc::clone(scheduler) as Arc<dyn Scheduler>)
    .build();
    (debouncer, calls)
}

#[test]
fn burst_with_small_gaps_fires_once_at_last_call_plus_wait() {
    let start = Instant::now();
    let scheduler = Arc::new(MockScheduler::new(start));
    let wait = Duration::from_millis(100);
    let (debouncer, calls) = recording_debouncer(wait, &scheduler);

    // Calls at t = 0, 40, 80, 120: every gap is below the wait.
    debouncer.invoke(1);
    for (gap, arg) in [(40, 2), (40, 3), (40, 4)] {
        scheduler.advance(Duration::from_millis(gap));
        debouncer.invoke(arg);
    }

    scheduler.advance(Duration::from_secs(10));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "one fire per burst");
    let (arg, at) = calls[0];
    assert_eq!(arg, 4, "latest arguments win");
    assert_eq!(at, start + Duration::from_millis(120) + wait);
}

#[test]
fn isolated_call_fires_once_wait_later() {
    let start = Instant::now();
    let scheduler = Arc::new(MockScheduler::new(start));
    let wait = Duration::from_millis(250);
    let (debouncer, calls) = recording_debouncer(wait, &scheduler);

    debouncer.invoke(9);
    scheduler.advance(Duration::from_secs(5));

    let calls = calls.lock().unwrap();
    assert_eq!(*calls, vec![(9, start + wait)]);
}

#[test]
fn gap_equal_to_wait_splits_bursts() {
    let scheduler = Arc::new(MockScheduler::new(Instant::now()));
    let (debouncer, calls) = recording_debouncer(Duration::from_millis(100), &scheduler);

    debouncer.invoke(1);
    scheduler.advance(Duration::from_millis(100)); // first burst fires here
    debouncer.invoke(2);
    scheduler.advance(Duration::from_millis(100));

    let fired: Vec<u32> = calls.lock().unwrap().iter().map(|(v, _)| *v).collect();
    assert_eq!(fired, vec![1, 2]);
}

#[test]
fn return_value_is_not_propagated_to_caller() {
    // The wrapped operation returns (); invoke itself returns nothing and
    // must complete before the target has run.
    let scheduler = Arc::new(MockScheduler::new(Instant::now()));
    let (debouncer, calls) = recording_debouncer(Duration::from_millis(10), &scheduler);

    debouncer.invoke(1);
    assert!(calls.lock().unwrap().is_empty(), "fire is deferred");
    scheduler.advance(Duration::from_millis(10));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn independent_debouncers_have_independent_timers() {
    let scheduler = Arc::new(MockScheduler::new(Instant::now()));
    let (a, calls_a) = recording_debouncer(Duration::from_millis(100), &scheduler);
    let (b, calls_b) = recording_debouncer(Duration::from_millis(200), &scheduler);

    a.invoke(1);
    b.invoke(2);
    scheduler.advance(Duration::from_millis(100));
    assert_eq!(calls_a.lock().unwrap().len(), 1);
    assert!(calls_b.lock().unwrap().is_empty());

    scheduler.advance(Duration::from_millis(100));
    assert_eq!(calls_b.lock().unwrap().len(), 1);
}

#[test]
fn cancel_then_reuse() {
    let scheduler = Arc::new(MockScheduler::new(Instant::now()));
    let (debouncer, calls) = recording_debouncer(Duration::from_millis(100), &scheduler);

    debouncer.invoke(1);
    debouncer.cancel();
    scheduler.advance(Duration::from_secs(1));
    assert!(calls.lock().unwrap().is_empty());

    debouncer.invoke(2);
    scheduler.advance(Duration::from_millis(100));
    let fired: Vec<u32> = calls.lock().unwrap().iter().map(|(v, _)| *v).collect();
    assert_eq!(fired, vec![2]);
}

#[test]
fn long_interleaving_of_bursts_and_quiet_periods() {
    let scheduler = Arc::new(MockScheduler::new(Instant::now()));
    let (debouncer, calls) = recording_debouncer(Duration::from_millis(50), &scheduler);

    // Three bursts separated by long quiet periods.
    for burst in 0..3_u32 {
        for i in 0..5 {
            debouncer.invoke(burst * 10 + i);
            scheduler.advance(Duration::from_millis(10));
        }
        scheduler.advance(Duration::from_millis(500));
    }

    let fired: Vec<u32> = calls.lock().unwrap().iter().map(|(v, _)| *v).collect();
    assert_eq!(fired, vec![4, 14, 24]);
}

#[test]
fn wall_clock_smoke_test_with_thread_scheduler() {
    // One non-virtual check that the default scheduler actually fires.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let debouncer = Debouncer::new(Duration::from_millis(20), move |v: u32| {
        sink.lock().unwrap().push(v);
    });

    debouncer.invoke(1);
    debouncer.invoke(2);
    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(*calls.lock().unwrap(), vec![2]);
}
