//! Named span timing with running aggregates.
//!
//! `SpanTimers` is a caller-owned registry: create one per run (or share one
//! behind `Arc` across tasks) instead of going through process-wide state.
//! Keys are caller-supplied; concurrent spans must use distinct keys or they
//! will clobber each other's start instant.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Accumulated statistics for one span name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanStats {
    /// Completed start/stop cycles.
    pub count: u64,
    /// Sum of all completed cycles.
    pub total: Duration,
}

impl SpanStats {
    /// Running average over all completed cycles.
    pub fn mean(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        self.total / self.count as u32
    }
}

#[derive(Default)]
struct SpanSlot {
    started: Option<Instant>,
    count: u64,
    total: Duration,
}

/// Registry of named spans with start/stop semantics.
///
/// `stop` on a name that was never started is a no-op returning `None`.
/// Aggregates survive across repeated cycles of the same name; slots are
/// created lazily and never removed.
#[derive(Default)]
pub struct SpanTimers {
    slots: DashMap<String, SpanSlot>,
}

impl SpanTimers {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Record the start instant for `name`, replacing any unfinished span.
    pub fn start(&self, name: &str) {
        let mut slot = self.slots.entry(name.to_string()).or_default();
        slot.started = Some(Instant::now());
    }

    /// Close the span for `name`: fold the elapsed time into the running
    /// aggregates and return it. `None` when no start is pending for `name`.
    pub fn stop(&self, name: &str) -> Option<Duration> {
        let mut slot = self.slots.get_mut(name)?;
        let started = slot.started.take()?;
        let elapsed = started.elapsed();
        slot.count += 1;
        slot.total += elapsed;
        Some(elapsed)
    }

    /// Aggregates for `name`; `None` when the name was never seen.
    pub fn stats(&self, name: &str) -> Option<SpanStats> {
        let slot = self.slots.get(name)?;
        Some(SpanStats {
            count: slot.count,
            total: slot.total,
        })
    }
}
