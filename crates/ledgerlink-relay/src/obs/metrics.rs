//! Relay metrics registry.
//!
//! Labeled counters are backed by `DashMap` with label keys flattened into
//! sorted vectors for deterministic rendering. The fan-out histogram uses
//! fixed millisecond buckets; deliveries are network round trips, so
//! sub-millisecond resolution buys nothing.

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        let counter = self.map.entry(key).or_default();
        counter.fetch_add(v, Ordering::Relaxed);
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for entry in self.map.iter() {
            let labels = entry
                .key()
                .iter()
                .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{name}{{{labels}}} {}", entry.value().load(Ordering::Relaxed));
        }
    }
}

/// Single-value gauge set to an absolute reading.
#[derive(Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} gauge");
        let _ = writeln!(out, "{name} {}", self.get());
    }
}

// 5ms .. 5s, covering a healthy local delivery up to one near the timeout.
const BUCKETS_MILLIS: [u64; 9] = [5, 10, 25, 50, 100, 250, 500, 1_000, 5_000];

/// Unlabeled cumulative histogram on a millisecond scale.
pub struct Histogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum: AtomicU64::new(0),
            buckets: Default::default(),
        }
    }
}

impl Histogram {
    pub fn observe(&self, duration: Duration) {
        let millis = duration.as_millis() as u64;
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(millis, Ordering::Relaxed);
        for (i, &le) in BUCKETS_MILLIS.iter().enumerate() {
            if millis <= le {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} histogram");
        for (i, &le) in BUCKETS_MILLIS.iter().enumerate() {
            let _ = writeln!(
                out,
                "{name}_bucket{{le=\"{le}\"}} {}",
                self.buckets[i].load(Ordering::Relaxed)
            );
        }
        let count = self.count.load(Ordering::Relaxed);
        let _ = writeln!(out, "{name}_bucket{{le=\"+Inf\"}} {count}");
        let _ = writeln!(out, "{name}_sum {}", self.sum.load(Ordering::Relaxed));
        let _ = writeln!(out, "{name}_count {count}");
    }
}

#[derive(Default)]
pub struct RelayMetrics {
    /// Contract events by outcome: applied, ignored, rejected.
    pub events_seen: CounterVec,
    /// Current size of the subscriber set.
    pub subscribers_active: Gauge,
    /// Individual deliveries by outcome: ok, error.
    pub deliveries: CounterVec,
    /// Ingest requests turned away, by reason.
    pub ingest_rejected: CounterVec,
    /// Wall time of a whole fan-out pass.
    pub forward_duration: Histogram,
}

impl RelayMetrics {
    /// Render all metrics in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.events_seen
            .render("ledgerlink_relay_events_total", &mut out);
        self.subscribers_active
            .render("ledgerlink_relay_subscribers_active", &mut out);
        self.deliveries
            .render("ledgerlink_relay_deliveries_total", &mut out);
        self.ingest_rejected
            .render("ledgerlink_relay_ingest_rejected_total", &mut out);
        self.forward_duration
            .render("ledgerlink_relay_forward_duration_millis", &mut out);
        out
    }
}
