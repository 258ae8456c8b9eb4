//! ledgerlink relay library entry.
//!
//! The relay bridges an asset contract to plain HTTP: the event listener
//! keeps the subscriber set in step with on-chain Send/Stop control events,
//! and the ingest endpoint fans sensor readings out to every subscriber. It
//! is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod forward;
pub mod ingest;
pub mod listener;
pub mod obs;
pub mod ops;
pub mod router;
pub mod subscribers;
