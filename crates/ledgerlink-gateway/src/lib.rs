//! ledgerlink gateway client library.
//!
//! This crate speaks to a ledger gateway service over HTTP and WebSocket:
//! connection profiles, the identity wallet, CA enrollment, contract
//! evaluate/submit, and the contract event stream. It is consumed by the
//! relay, the benchmark driver, and integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod ca;
pub mod client;
pub mod events;
pub mod profile;
pub mod wallet;

mod http;

pub use client::{AssetContract, ConnectOptions, Contract, Gateway, Network};
pub use events::ContractEventStream;
pub use profile::ConnectionProfile;
pub use wallet::{Identity, Wallet};
