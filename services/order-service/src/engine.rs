//! Order engine: admission and cancellation
//!
//! Every mutating operation follows the same unit of work:
//! 1. take the user's lock
//! 2. read balance, position and open reservations
//! 3. decide
//! 4. write at most one row
//!
//! The lock guard is scoped to the closure passed to
//! [`LockRegistry::with_lock`], so it is released on every return path.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use types::errors::OrderError;
use types::ids::{OrderId, StockId, UserId};
use types::numeric::Position;
use types::order::{Order, OrderRequest, Side};
use types::transaction::Transaction;
use types::user::User;

use crate::capacity::Exposure;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::ledger::Ledger;
use crate::locks::LockRegistry;
use crate::store::Store;

/// Order admission/cancellation service
pub struct OrderEngine<S> {
    store: Arc<S>,
    locks: Arc<LockRegistry>,
    ledger: Ledger<S>,
    config: EngineConfig,
}

impl<S: Store> OrderEngine<S> {
    /// Create an engine with default configuration
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with custom configuration
    pub fn with_config(store: Arc<S>, config: EngineConfig) -> Self {
        let locks = Arc::new(LockRegistry::new());
        Self {
            ledger: Ledger::new(Arc::clone(&store), Arc::clone(&locks)),
            store,
            locks,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    /// Place a sell order for `user_id`
    pub fn place_ask(&self, user_id: UserId, request: OrderRequest) -> EngineResult<OrderId> {
        self.place(user_id, Side::Ask, request)
    }

    /// Place a buy order for `user_id`
    pub fn place_bid(&self, user_id: UserId, request: OrderRequest) -> EngineResult<OrderId> {
        self.place(user_id, Side::Bid, request)
    }

    /// Admit an order if the user has capacity for it on `side`
    ///
    /// On any error no row is written.
    pub fn place(&self, user_id: UserId, side: Side, request: OrderRequest) -> EngineResult<OrderId> {
        self.validate(user_id, &request)?;

        let result = self.locks.with_lock(user_id, || -> EngineResult<Order> {
            let exposure = self.exposure(user_id, side, request.stock_id)?;
            exposure.check(&request)?;
            Ok(self.store.create_order(side, request.clone())?)
        });

        match result {
            Ok(order) => {
                info!(
                    user_id = %user_id,
                    order_id = %order.id,
                    side = %side,
                    stock_id = %order.stock_id,
                    quantity = %order.quantity,
                    price = %order.price,
                    "Order placed"
                );
                Ok(order.id)
            }
            Err(e) => {
                warn!(user_id = %user_id, side = %side, error = %e, "Order rejected");
                Err(e)
            }
        }
    }

    /// Cancel an open order owned by `user_id`
    ///
    /// Ownership is checked against the stored order, not the caller's
    /// claim. A second cancel of the same id reports `NotFound`.
    pub fn cancel(&self, user_id: UserId, order_id: OrderId, side: Side) -> EngineResult<()> {
        let result = self.locks.with_lock(user_id, || -> EngineResult<()> {
            let order = self
                .store
                .order(side, order_id)?
                .ok_or(OrderError::NotFound { side, order_id })?;

            if !order.is_owned_by(user_id) {
                return Err(OrderError::NotOwner { order_id, user_id }.into());
            }

            // A concurrent cancel by the owner is serialized by the lock,
            // so the row is still there unless the store lost it.
            self.store
                .delete_order(side, order_id)?
                .ok_or(OrderError::NotFound { side, order_id })?;
            Ok(())
        });

        match &result {
            Ok(()) => info!(user_id = %user_id, order_id = %order_id, side = %side, "Order cancelled"),
            Err(e) => warn!(user_id = %user_id, order_id = %order_id, side = %side, error = %e, "Cancel rejected"),
        }
        result
    }

    /// Net signed shares per stock for `user_id`
    pub fn stocks_owned(&self, user_id: UserId) -> EngineResult<HashMap<StockId, Position>> {
        self.ledger.stocks_owned(user_id)
    }

    /// A user's open orders on one side
    pub fn open_orders(&self, user_id: UserId, side: Side) -> EngineResult<Vec<Order>> {
        Ok(self.store.open_orders(user_id, side)?)
    }

    /// Record a settled trade leg; see [`Ledger::settle`]
    pub fn settle(&self, transaction: Transaction) -> EngineResult<User> {
        self.ledger.settle(transaction)
    }

    /// Checks that need no lock: payload shape and referenced rows
    fn validate(&self, user_id: UserId, request: &OrderRequest) -> EngineResult<()> {
        if request.user_id != user_id {
            return Err(OrderError::OwnerMismatch {
                user_id,
                owner: request.user_id,
            }
            .into());
        }
        if request.quantity.is_zero() {
            return Err(OrderError::InvalidQuantity("quantity must be positive".to_string()).into());
        }
        request.cost()?;
        if self.store.stock(request.stock_id)?.is_none() {
            return Err(OrderError::UnknownStock {
                stock_id: request.stock_id,
            }
            .into());
        }
        self.ledger.user(user_id)?;
        Ok(())
    }

    /// Current capacity figures for one side. Call with the user's lock held.
    fn exposure(&self, user_id: UserId, side: Side, stock_id: StockId) -> EngineResult<Exposure> {
        let exposure = match side {
            Side::Ask => Exposure::Ask {
                position: self.ledger.position_of(user_id, stock_id)?,
                reserved: self.store.reserved_ask_quantity(user_id, stock_id)?,
                short_sell_allowance: self.config.short_sell_allowance,
            },
            Side::Bid => Exposure::Bid {
                cash: self.ledger.cash_of(user_id)?,
                reserved: self.store.reserved_bid_cost(user_id)?,
            },
        };
        debug!(user_id = %user_id, ?exposure, available = %exposure.available(), "Computed exposure");
        Ok(exposure)
    }
}

/// Shorthand used by callers that only care whether an error is a rejection
pub fn is_rejection(err: &EngineError) -> bool {
    matches!(err, EngineError::Order(OrderError::InsufficientCapacity { .. }))
}
