//! ledgerlink core: instrumentation primitives, wire types, and the shared
//! error surface.
//!
//! This crate holds the timer registry and latency aggregation used by the
//! benchmark and pinning binaries, the contract-event envelope and subscriber
//! instructions consumed by the relay, and the error type shared by every
//! ledgerlink crate. Nothing here touches a transport or pulls in an async
//! runtime, so any of the binaries can depend on it without dragging one in.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `LinkError`/`Result` so the binaries do
//! not crash on malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod asset;
pub mod control;
pub mod error;
pub mod event;
pub mod stats;
pub mod timing;

/// Shared result type.
pub use error::{LinkError, Result};
