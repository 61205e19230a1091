//! Order Service
//!
//! Admission and cancellation of asks and bids for the simulated exchange,
//! with balances derived from an append-only ledger.
//!
//! - `store`: persistence port and the in-memory store
//! - `ledger`: position aggregation and settlement
//! - `locks`: per-user lock registry
//! - `capacity`: ask/bid capacity rules
//! - `engine`: order admission and cancellation
//! - `identity`: login through the external identity provider

pub mod capacity;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod locks;
pub mod store;

pub use config::{EngineConfig, IdentityConfig};
pub use engine::OrderEngine;
pub use error::{EngineError, EngineResult};
pub use identity::{Authenticator, HttpIdentityProvider, IdentityProvider};
pub use store::{MemoryStore, Store, StoreError};
