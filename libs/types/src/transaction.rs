//! Ledger transactions
//!
//! The ledger is append-only: a transaction is written once when a trade
//! settles and never changed afterwards. Positions and cash history are
//! derived from it.

use crate::ids::{StockId, TransactionId, UserId};
use crate::numeric::{Cash, Position, Price};
use serde::{Deserialize, Serialize};

/// Origin of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Bought from or sold to the exchange itself
    FromExchange,
    /// Settlement of a matched ask/bid pair
    OrderFill,
    /// Stocks pledged to or released from the bank
    Mortgage,
    /// Dividend payout
    Dividend,
}

/// Immutable ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub stock_id: StockId,
    pub kind: TransactionType,
    /// Signed share delta: positive acquired, negative disposed
    pub stock_quantity: Position,
    pub price: Price,
    /// Signed cash delta applied to the user on settlement
    pub total: Cash,
    pub created_at: i64, // Unix nanos
}

impl Transaction {
    pub fn new(
        user_id: UserId,
        stock_id: StockId,
        kind: TransactionType,
        stock_quantity: Position,
        price: Price,
        total: Cash,
        created_at: i64,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            stock_id,
            kind,
            stock_quantity,
            price,
            total,
            created_at,
        }
    }

    /// Check if this entry moved shares into the user's account
    pub fn is_acquisition(&self) -> bool {
        self.stock_quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_transaction_creation() {
        let tx = Transaction::new(
            UserId::new(2),
            StockId::new(1),
            TransactionType::FromExchange,
            10,
            Price::from_u64(200),
            Decimal::from(-2000),
            1708123456789000000,
        );

        assert!(tx.is_acquisition());
        assert_eq!(tx.total, Decimal::from(-2000));
    }

    #[test]
    fn test_disposal() {
        let tx = Transaction::new(
            UserId::new(2),
            StockId::new(1),
            TransactionType::OrderFill,
            -10,
            Price::from_u64(200),
            Decimal::from(2000),
            1708123456789000000,
        );

        assert!(!tx.is_acquisition());
    }

    #[test]
    fn test_type_wire_names() {
        let json = serde_json::to_string(&TransactionType::FromExchange).unwrap();
        assert_eq!(json, "\"FROM_EXCHANGE\"");
    }
}
