//! Persistence port
//!
//! The order core needs a row store with atomic single-row create, read and
//! delete, plus aggregate sums over the ledger and the open-order tables.
//! Nothing here spans rows; multi-row decisions are serialized by the
//! per-user lock in [`crate::locks`].

pub mod memory;

use std::collections::HashMap;
use thiserror::Error;
use types::ids::{OrderId, StockId, UserId};
use types::numeric::{Cash, Position, Quantity};
use types::order::{Order, OrderRequest, Side};
use types::stock::Stock;
use types::transaction::Transaction;
use types::user::User;

pub use memory::MemoryStore;

/// Underlying store failure. Never retried by the order core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Duplicate {table} row: {id}")]
    Duplicate { table: &'static str, id: String },

    #[error("Missing {table} row: {id}")]
    Missing { table: &'static str, id: String },

    #[error("Value out of range in {table} row: {id}")]
    Overflow { table: &'static str, id: String },
}

/// Row store consumed by the ledger and the order services
pub trait Store: Send + Sync {
    // ── Users ──

    /// Insert a user; fails with `Duplicate` if the id is taken
    fn create_user(&self, user: User) -> Result<User, StoreError>;

    fn user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Atomically add `delta` to the user's cash and lifetime total
    fn adjust_cash(&self, id: UserId, delta: Cash) -> Result<User, StoreError>;

    fn delete_user(&self, id: UserId) -> Result<bool, StoreError>;

    // ── Stock catalog ──

    fn create_stock(&self, stock: Stock) -> Result<Stock, StoreError>;

    fn stock(&self, id: StockId) -> Result<Option<Stock>, StoreError>;

    fn stocks(&self) -> Result<Vec<Stock>, StoreError>;

    // ── Ledger ──

    fn append_transaction(&self, transaction: Transaction) -> Result<(), StoreError>;

    /// A user's ledger entries, oldest first
    fn transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, StoreError>;

    /// Sum of quantity deltas for one (user, stock); zero when absent
    fn position_sum(&self, user_id: UserId, stock_id: StockId) -> Result<Position, StoreError>;

    /// Sum of quantity deltas per stock for one user, grouped by stock
    fn position_sums(&self, user_id: UserId) -> Result<HashMap<StockId, Position>, StoreError>;

    // ── Orders ──

    /// Persist a new order, assigning the next id for its side
    fn create_order(&self, side: Side, request: OrderRequest) -> Result<Order, StoreError>;

    /// Persist an order with a caller-chosen id (imports, fixtures)
    fn insert_order(&self, order: Order) -> Result<(), StoreError>;

    fn order(&self, side: Side, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Remove an order, returning the row that was deleted
    fn delete_order(&self, side: Side, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// A user's open orders on one side, ordered by id
    fn open_orders(&self, user_id: UserId, side: Side) -> Result<Vec<Order>, StoreError>;

    /// Shares held back by a user's open asks on one stock
    fn reserved_ask_quantity(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> Result<Quantity, StoreError>;

    /// Cash held back by a user's open bids across all stocks
    ///
    /// Saturates at `Decimal::MAX` rather than overflowing.
    fn reserved_bid_cost(&self, user_id: UserId) -> Result<Cash, StoreError>;

    fn order_count(&self, side: Side) -> Result<usize, StoreError>;
}
