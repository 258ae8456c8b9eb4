//! Pinning service client: upload local files, fetch objects by content
//! identifier, and verify downloads against an expected SHA-256.

pub mod client;

pub use client::{sha256_hex, PinClient, PinReceipt};
