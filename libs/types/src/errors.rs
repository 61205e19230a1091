//! Error types for order admission and cancellation
//!
//! Business-rule failures the caller can act on. Storage and identity
//! failures are defined next to their ports in the order service.

use crate::ids::{OrderId, StockId, UserId};
use crate::order::Side;
use thiserror::Error;

/// Order-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Insufficient {side} capacity: required {required}, available {available}")]
    InsufficientCapacity {
        side: Side,
        required: String,
        available: String,
    },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Order not found: {side} {order_id}")]
    NotFound { side: Side, order_id: OrderId },

    #[error("Order {order_id} does not belong to user {user_id}")]
    NotOwner { order_id: OrderId, user_id: UserId },

    #[error("User {user_id} cannot place an order on behalf of user {owner}")]
    OwnerMismatch { user_id: UserId, owner: UserId },

    #[error("User not found: {user_id}")]
    UnknownUser { user_id: UserId },

    #[error("Stock not found: {stock_id}")]
    UnknownStock { stock_id: StockId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_capacity_display() {
        let err = OrderError::InsufficientCapacity {
            side: Side::Bid,
            required: "2200".to_string(),
            available: "0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient bid capacity: required 2200, available 0"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = OrderError::NotFound {
            side: Side::Ask,
            order_id: OrderId::new(250),
        };
        assert_eq!(err.to_string(), "Order not found: ask 250");
    }
}
