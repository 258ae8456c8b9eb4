//! Concurrent change-owner benchmark for a ledger gateway.
//!
//! The driver fires a fixed number of transactions as one task group and
//! reduces their latencies to a single closing report.

pub mod driver;
pub mod report;
