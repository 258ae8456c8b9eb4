//! Closing benchmark report.

use std::fmt;
use std::time::Duration;

use ledgerlink_core::stats::{format_duration, LatencyStats};

/// Aggregate outcome of one run, printed exactly once after the last
/// submission has completed.
#[derive(Debug)]
pub struct BenchReport {
    /// Submissions dispatched.
    pub requested: usize,
    /// Submissions that errored or panicked. Their samples are dropped.
    pub failed: usize,
    /// One latency sample per successful submission.
    pub samples: LatencyStats,
    /// Wall-clock span from first dispatch to last completion.
    pub window: Duration,
}

impl BenchReport {
    pub fn succeeded(&self) -> usize {
        self.samples.len()
    }

    /// Successful submissions per second over the submit window.
    pub fn tps(&self) -> f64 {
        self.samples.throughput(self.window)
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Submitted {} transactions in {} ({} failed)",
            self.requested,
            format_duration(self.window),
            self.failed
        )?;
        if self.samples.is_empty() {
            return write!(f, "No successful submissions, nothing to report");
        }
        writeln!(f, "Latency Min: {}", format_duration(self.samples.min()))?;
        writeln!(f, "Latency Max: {}", format_duration(self.samples.max()))?;
        writeln!(f, "Latency AVG: {}", format_duration(self.samples.mean()))?;
        writeln!(
            f,
            "Latency p50: {}  p95: {}  p99: {}",
            format_duration(self.samples.percentile(50.0)),
            format_duration(self.samples.percentile(95.0)),
            format_duration(self.samples.percentile(99.0))
        )?;
        write!(f, "TPS: {:.2}", self.tps())
    }
}
