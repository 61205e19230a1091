//! Types library for the simulated stock exchange
//!
//! Core type definitions shared by the order service and the gateway.
//!
//! # Modules
//! - `ids`: Identifiers (UserId, StockId, OrderId, TransactionId)
//! - `numeric`: Price, Quantity and cash/position aliases
//! - `user`: User accounts
//! - `stock`: Stock catalog entries
//! - `transaction`: Append-only ledger entries
//! - `order`: Ask/bid orders
//! - `errors`: Order error taxonomy

pub mod ids;
pub mod numeric;
pub mod user;
pub mod stock;
pub mod transaction;
pub mod order;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::user::*;
    pub use crate::stock::*;
    pub use crate::transaction::*;
    pub use crate::order::*;
    pub use crate::errors::*;
}
