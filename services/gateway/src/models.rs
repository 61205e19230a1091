use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::ids::{OrderId, StockId, UserId};
use types::numeric::{Position, Price, Quantity};
use types::order::{OrderRequest, OrderType, Side};
use types::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub cash: Decimal,
    pub total: Decimal,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            name: user.name,
            cash: user.cash,
            total: user.total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}

fn default_order_type() -> OrderType {
    OrderType::Limit
}

/// Order body; the owner always comes from the session token
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub stock_id: StockId,
    #[serde(default = "default_order_type")]
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub price: Price,
}

impl PlaceOrderRequest {
    pub fn into_request(self, user_id: UserId) -> OrderRequest {
        OrderRequest::new(user_id, self.stock_id, self.order_type, self.quantity, self.price)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub side: Side,
}

#[derive(Debug, Clone, Serialize)]
pub struct StocksOwnedResponse {
    pub stocks_owned: BTreeMap<StockId, Position>,
}
