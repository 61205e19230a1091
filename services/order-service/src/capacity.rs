//! Admission capacity
//!
//! How much a user may still commit on one side:
//! - ask: ledger position + short-sell allowance - shares on open asks
//! - bid: cash - cost of open bids
//!
//! Both checks are pure; the caller supplies figures read under the user's
//! lock.

use rust_decimal::Decimal;
use types::errors::OrderError;
use types::numeric::{Cash, Position, Quantity};
use types::order::{OrderRequest, Side};

/// Snapshot of the figures an admission decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    Ask {
        position: Position,
        reserved: Quantity,
        short_sell_allowance: u64,
    },
    Bid {
        cash: Cash,
        reserved: Cash,
    },
}

impl Exposure {
    pub fn side(&self) -> Side {
        match self {
            Exposure::Ask { .. } => Side::Ask,
            Exposure::Bid { .. } => Side::Bid,
        }
    }

    /// Remaining capacity in the side's unit (shares for asks, cash for bids)
    pub fn available(&self) -> Decimal {
        match *self {
            Exposure::Ask {
                position,
                reserved,
                short_sell_allowance,
            } => {
                Decimal::from(position) + Decimal::from(short_sell_allowance)
                    - Decimal::from(reserved.get())
            }
            Exposure::Bid { cash, reserved } => cash.saturating_sub(reserved),
        }
    }

    /// What `request` would consume, in the same unit as [`Self::available`]
    pub fn required(&self, request: &OrderRequest) -> Result<Decimal, OrderError> {
        match self {
            Exposure::Ask { .. } => Ok(Decimal::from(request.quantity.get())),
            Exposure::Bid { .. } => request.cost(),
        }
    }

    /// Admit or reject `request` against this snapshot
    pub fn check(&self, request: &OrderRequest) -> Result<(), OrderError> {
        let required = self.required(request)?;
        let available = self.available();
        if required > available {
            return Err(OrderError::InsufficientCapacity {
                side: self.side(),
                required: required.to_string(),
                available: available.max(Decimal::ZERO).to_string(),
            });
        }
        Ok(())
    }
}
