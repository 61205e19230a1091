//! Order types
//!
//! Asks and bids share one shape; `Side` tells them apart. An order is open
//! for as long as its row exists in the order store. Quantity and price are
//! fixed once the order is admitted.

use crate::errors::OrderError;
use crate::ids::{OrderId, StockId, UserId};
use crate::numeric::{Cash, Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Sell order, reserves shares
    Ask,
    /// Buy order, reserves cash
    Bid,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Ask => "ask",
            Side::Bid => "bid",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution style of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Trade at `price` or better
    Limit,
    /// Trade at the best available price; `price` caps the reservation
    Market,
    /// Becomes a market order once the stock trades through `price`
    StopLoss,
}

/// Order payload as submitted by a user, before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: UserId,
    pub stock_id: StockId,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Price,
}

impl OrderRequest {
    pub fn new(
        user_id: UserId,
        stock_id: StockId,
        order_type: OrderType,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            user_id,
            stock_id,
            order_type,
            quantity,
            price,
        }
    }

    /// Limit order shorthand
    pub fn limit(user_id: UserId, stock_id: StockId, quantity: u64, price: Price) -> Self {
        Self::new(user_id, stock_id, OrderType::Limit, Quantity::new(quantity), price)
    }

    /// Cash this request would tie up as a bid
    pub fn cost(&self) -> Result<Cash, OrderError> {
        self.price.cost_of(self.quantity).ok_or_else(|| {
            OrderError::InvalidPrice(format!(
                "{} shares at {} exceeds the cash range",
                self.quantity, self.price
            ))
        })
    }
}

/// An admitted, open order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub user_id: UserId,
    pub stock_id: StockId,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Price,
}

impl Order {
    pub fn new(id: OrderId, side: Side, request: OrderRequest) -> Self {
        Self {
            id,
            side,
            user_id: request.user_id,
            stock_id: request.stock_id,
            order_type: request.order_type,
            quantity: request.quantity,
            price: request.price,
        }
    }

    /// Cash held back by this order while it is open (bids only matter)
    pub fn cost(&self) -> Option<Cash> {
        self.price.cost_of(self.quantity)
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_order_from_request() {
        let request = OrderRequest::limit(UserId::new(2), StockId::new(1), 5, Price::from_u64(200));
        let order = Order::new(OrderId::new(1), Side::Bid, request.clone());

        assert_eq!(order.user_id, request.user_id);
        assert_eq!(order.quantity, Quantity::new(5));
        assert_eq!(order.cost(), Some(Decimal::from(1000)));
        assert_eq!(request.cost(), Ok(Decimal::from(1000)));
        assert!(order.is_owned_by(UserId::new(2)));
        assert!(!order.is_owned_by(UserId::new(3)));
    }

    #[test]
    fn test_overflowing_cost_is_invalid_price() {
        let price = Price::try_new(Decimal::MAX).unwrap();
        let request = OrderRequest::limit(UserId::new(2), StockId::new(1), 2, price);
        assert!(matches!(request.cost(), Err(OrderError::InvalidPrice(_))));
        assert_eq!(Order::new(OrderId::new(1), Side::Bid, request).cost(), None);
    }

    #[test]
    fn test_order_serialization() {
        let order = Order::new(
            OrderId::new(150),
            Side::Ask,
            OrderRequest::new(
                UserId::new(2),
                StockId::new(1),
                OrderType::StopLoss,
                Quantity::new(2),
                Price::from_u64(200),
            ),
        );

        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"side\":\"ASK\""));
        assert!(json.contains("\"order_type\":\"STOP_LOSS\""));

        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
