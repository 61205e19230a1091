//! In-memory row store
//!
//! Each table is a concurrent map, so every single-row operation is atomic on
//! its own. The ledger is an append-only vector behind a read/write lock;
//! aggregate reads take the read side and sum in one pass without copying
//! rows out.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use types::ids::{OrderId, StockId, UserId};
use types::numeric::{Cash, Position, Quantity};
use types::order::{Order, OrderRequest, Side};
use types::stock::Stock;
use types::transaction::Transaction;
use types::user::User;

use super::{Store, StoreError};

/// One order table (asks or bids) with its own id sequence
struct OrderTable {
    name: &'static str,
    rows: DashMap<OrderId, Order>,
    next_id: AtomicU64,
}

impl OrderTable {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn create(&self, side: Side, request: OrderRequest) -> Order {
        loop {
            let id = OrderId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            // Skip ids claimed through `insert`
            if let Entry::Vacant(slot) = self.rows.entry(id) {
                let order = Order::new(id, side, request);
                slot.insert(order.clone());
                return order;
            }
        }
    }

    fn insert(&self, order: Order) -> Result<(), StoreError> {
        let id = order.id;
        match self.rows.entry(id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                table: self.name,
                id: id.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(order);
                self.next_id.fetch_max(id.get() + 1, Ordering::SeqCst);
                Ok(())
            }
        }
    }
}

/// Store backed by process memory
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    stocks: DashMap<StockId, Stock>,
    ledger: RwLock<Vec<Transaction>>,
    asks: OrderTable,
    bids: OrderTable,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            stocks: DashMap::new(),
            ledger: RwLock::new(Vec::new()),
            asks: OrderTable::new("asks"),
            bids: OrderTable::new("bids"),
        }
    }

    fn table(&self, side: Side) -> &OrderTable {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }

    /// Total number of ledger rows
    pub fn ledger_len(&self) -> usize {
        self.ledger.read().len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn create_user(&self, user: User) -> Result<User, StoreError> {
        match self.users.entry(user.id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                table: "users",
                id: user.id.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    fn adjust_cash(&self, id: UserId, delta: Cash) -> Result<User, StoreError> {
        let mut user = self.users.get_mut(&id).ok_or_else(|| StoreError::Missing {
            table: "users",
            id: id.to_string(),
        })?;
        let overflow = || StoreError::Overflow {
            table: "users",
            id: id.to_string(),
        };
        let cash = user.cash.checked_add(delta).ok_or_else(overflow)?;
        let total = user.total.checked_add(delta).ok_or_else(overflow)?;
        user.cash = cash;
        user.total = total;
        Ok(user.clone())
    }

    fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        Ok(self.users.remove(&id).is_some())
    }

    fn create_stock(&self, stock: Stock) -> Result<Stock, StoreError> {
        match self.stocks.entry(stock.id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                table: "stocks",
                id: stock.id.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(stock.clone());
                Ok(stock)
            }
        }
    }

    fn stock(&self, id: StockId) -> Result<Option<Stock>, StoreError> {
        Ok(self.stocks.get(&id).map(|s| s.value().clone()))
    }

    fn stocks(&self) -> Result<Vec<Stock>, StoreError> {
        let mut stocks: Vec<Stock> = self.stocks.iter().map(|s| s.value().clone()).collect();
        stocks.sort_by_key(|s| s.id);
        Ok(stocks)
    }

    fn append_transaction(&self, transaction: Transaction) -> Result<(), StoreError> {
        self.ledger.write().push(transaction);
        Ok(())
    }

    fn transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .ledger
            .read()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    fn position_sum(&self, user_id: UserId, stock_id: StockId) -> Result<Position, StoreError> {
        Ok(self
            .ledger
            .read()
            .iter()
            .filter(|t| t.user_id == user_id && t.stock_id == stock_id)
            .map(|t| t.stock_quantity)
            .sum())
    }

    fn position_sums(&self, user_id: UserId) -> Result<HashMap<StockId, Position>, StoreError> {
        let mut sums = HashMap::new();
        for t in self.ledger.read().iter().filter(|t| t.user_id == user_id) {
            *sums.entry(t.stock_id).or_insert(0) += t.stock_quantity;
        }
        Ok(sums)
    }

    fn create_order(&self, side: Side, request: OrderRequest) -> Result<Order, StoreError> {
        Ok(self.table(side).create(side, request))
    }

    fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        self.table(order.side).insert(order)
    }

    fn order(&self, side: Side, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.table(side).rows.get(&id).map(|o| o.value().clone()))
    }

    fn delete_order(&self, side: Side, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.table(side).rows.remove(&id).map(|(_, order)| order))
    }

    fn open_orders(&self, user_id: UserId, side: Side) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .table(side)
            .rows
            .iter()
            .filter(|o| o.user_id == user_id)
            .map(|o| o.value().clone())
            .collect();
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    fn reserved_ask_quantity(
        &self,
        user_id: UserId,
        stock_id: StockId,
    ) -> Result<Quantity, StoreError> {
        Ok(self
            .asks
            .rows
            .iter()
            .filter(|o| o.user_id == user_id && o.stock_id == stock_id)
            .fold(Quantity::zero(), |acc, o| acc + o.quantity))
    }

    fn reserved_bid_cost(&self, user_id: UserId) -> Result<Cash, StoreError> {
        Ok(self
            .bids
            .rows
            .iter()
            .filter(|o| o.user_id == user_id)
            .map(|o| o.cost().unwrap_or(Decimal::MAX))
            .fold(Decimal::ZERO, |acc, cost| acc.saturating_add(cost)))
    }

    fn order_count(&self, side: Side) -> Result<usize, StoreError> {
        Ok(self.table(side).rows.len())
    }
}
