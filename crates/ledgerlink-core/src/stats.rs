//! Latency sample collection and summary statistics.

use std::fmt;
use std::time::Duration;

/// A bag of latency samples with summary accessors.
///
/// Samples keep insertion order; percentile queries sort a copy so recording
/// stays cheap inside a hot loop.
#[derive(Debug, Clone, Default)]
pub struct LatencyStats {
    samples: Vec<Duration>,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    pub fn record(&mut self, sample: Duration) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().min().copied().unwrap_or(Duration::ZERO)
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().max().copied().unwrap_or(Duration::ZERO)
    }

    pub fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    /// Nearest-rank percentile, `p` in 0.0..=100.0.
    pub fn percentile(&self, p: f64) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted = self.samples.clone();
        sorted.sort();
        let rank = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[rank.min(sorted.len() - 1)]
    }

    /// Completed samples per second over `window`. Zero when the window is
    /// empty, so a degenerate run cannot divide by zero.
    pub fn throughput(&self, window: Duration) -> f64 {
        if window.is_zero() {
            return 0.0;
        }
        self.samples.len() as f64 / window.as_secs_f64()
    }
}

/// Render a duration at a scale a human can read: microseconds below one
/// millisecond, milliseconds below one second, seconds above.
pub fn format_duration(d: Duration) -> FormattedDuration {
    FormattedDuration(d)
}

pub struct FormattedDuration(Duration);

impl fmt::Display for FormattedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        if d < Duration::from_millis(1) {
            write!(f, "{}µs", d.as_micros())
        } else if d < Duration::from_secs(1) {
            write!(f, "{:.2}ms", d.as_secs_f64() * 1000.0)
        } else {
            write!(f, "{:.2}s", d.as_secs_f64())
        }
    }
}
