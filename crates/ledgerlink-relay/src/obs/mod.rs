//! Lightweight in-process metrics.
//!
//! No metrics crate is involved: labeled counters sit in `DashMap`s and the
//! fan-out histogram in plain atomics. The `/metrics` handler renders both
//! in Prometheus text format.

pub mod metrics;
