//! Ledger and position aggregation
//!
//! Positions are never stored; they are the signed sum of a user's ledger
//! quantity deltas, computed by the store in one aggregate pass. Cash is
//! read from the user record, which only `settle` changes.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};
use types::errors::OrderError;
use types::ids::{StockId, UserId};
use types::numeric::{Cash, Position};
use types::transaction::Transaction;
use types::user::User;

use crate::error::EngineResult;
use crate::locks::LockRegistry;
use crate::store::Store;

/// Read side of the ledger plus the settlement entry point
pub struct Ledger<S> {
    store: Arc<S>,
    locks: Arc<LockRegistry>,
}

impl<S: Store> Ledger<S> {
    pub fn new(store: Arc<S>, locks: Arc<LockRegistry>) -> Self {
        Self { store, locks }
    }

    /// Net signed shares of `stock_id` held by `user_id`
    pub fn position_of(&self, user_id: UserId, stock_id: StockId) -> EngineResult<Position> {
        Ok(self.store.position_sum(user_id, stock_id)?)
    }

    /// Net signed shares per stock the user has ever transacted in
    pub fn stocks_owned(&self, user_id: UserId) -> EngineResult<HashMap<StockId, Position>> {
        Ok(self.store.position_sums(user_id)?)
    }

    /// Cash balance from the user record
    pub fn cash_of(&self, user_id: UserId) -> EngineResult<Cash> {
        Ok(self.user(user_id)?.cash)
    }

    pub fn user(&self, user_id: UserId) -> EngineResult<User> {
        self.store
            .user(user_id)?
            .ok_or_else(|| OrderError::UnknownUser { user_id }.into())
    }

    /// A user's settled transactions, oldest first
    pub fn history(&self, user_id: UserId) -> EngineResult<Vec<Transaction>> {
        Ok(self.store.transactions(user_id)?)
    }

    /// Record a settled trade leg and apply its cash delta
    ///
    /// Runs under the user's lock so an admission check never sees the
    /// ledger row without the matching cash change. Cash moves first and the
    /// row is appended only once that succeeds; a failed append reverses the
    /// cash change, so on any error neither write is left behind.
    pub fn settle(&self, transaction: Transaction) -> EngineResult<User> {
        let user_id = transaction.user_id;
        self.locks.with_lock(user_id, || -> EngineResult<User> {
            self.user(user_id)?;

            let delta = transaction.total;
            debug!(
                user_id = %user_id,
                stock_id = %transaction.stock_id,
                quantity = transaction.stock_quantity,
                total = %delta,
                "Settling transaction"
            );
            let user = self.store.adjust_cash(user_id, delta)?;

            if let Err(e) = self.store.append_transaction(transaction) {
                if let Err(undo) = self.store.adjust_cash(user_id, -delta) {
                    error!(
                        user_id = %user_id,
                        total = %delta,
                        error = %undo,
                        "Failed to reverse cash after ledger append failed"
                    );
                }
                return Err(e.into());
            }

            info!(user_id = %user_id, cash = %user.cash, "Transaction settled");
            Ok(user)
        })
    }
}
