#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ledgerlink_core::timing::SpanTimers;

#[test]
fn stop_without_start_is_a_silent_no_op() {
    let timers = SpanTimers::new();
    assert_eq!(timers.stop("never-started"), None);
    assert!(timers.stats("never-started").is_none());
}

#[test]
fn aggregates_survive_repeated_cycles() {
    let timers = SpanTimers::new();
    for _ in 0..5 {
        timers.start("work");
        thread::sleep(Duration::from_millis(2));
        let elapsed = timers.stop("work").expect("span was started");
        assert!(elapsed >= Duration::from_millis(2));
    }
    let stats = timers.stats("work").expect("span has history");
    assert_eq!(stats.count, 5);
    assert!(stats.total >= Duration::from_millis(10));
    assert_eq!(stats.mean(), stats.total / 5);
}

#[test]
fn restart_replaces_the_pending_start() {
    let timers = SpanTimers::new();
    timers.start("span");
    thread::sleep(Duration::from_millis(50));
    timers.start("span");
    let elapsed = timers.stop("span").expect("span was restarted");
    // Only the second start counts; the first 50ms must not leak in.
    assert!(elapsed < Duration::from_millis(50));
}

#[test]
fn stop_clears_the_pending_start() {
    let timers = SpanTimers::new();
    timers.start("once");
    timers.stop("once").expect("span was started");
    assert_eq!(timers.stop("once"), None);
    let stats = timers.stats("once").expect("span has history");
    assert_eq!(stats.count, 1);
}

#[test]
fn concurrent_spans_under_distinct_keys_do_not_interfere() {
    let timers = Arc::new(SpanTimers::new());
    let mut handles = Vec::new();
    for i in 0..8 {
        let timers = Arc::clone(&timers);
        handles.push(thread::spawn(move || {
            let key = format!("tx#{i}");
            timers.start(&key);
            thread::sleep(Duration::from_millis(1));
            timers.stop(&key).expect("own span was started");
        }));
    }
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
    for i in 0..8 {
        let stats = timers.stats(&format!("tx#{i}")).expect("span has history");
        assert_eq!(stats.count, 1);
        assert!(stats.total >= Duration::from_millis(1));
    }
}
