//! Position aggregation tests
//!
//! `stocks_owned` must be the exact signed sum of ledger deltas per stock,
//! whatever order the rows were written in and however many readers run at
//! once.

use order_service::{MemoryStore, OrderEngine, Store};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use types::ids::{StockId, UserId};
use types::numeric::Price;
use types::stock::Stock;
use types::transaction::{Transaction, TransactionType};
use types::user::User;

fn make_trans(user: u32, stock: u32, qty: i64, price: u64) -> Transaction {
    Transaction::new(
        UserId::new(user),
        StockId::new(stock),
        TransactionType::FromExchange,
        qty,
        Price::from_u64(price),
        Decimal::from(2000),
        1708123456789000000,
    )
}

#[test]
fn test_stocks_owned_per_user() {
    let store = Arc::new(MemoryStore::new());
    for (id, cash) in [(2, 2000), (3, 1000), (4, 5000)] {
        store
            .create_user(User::with_cash(UserId::new(id), Decimal::from(cash)))
            .unwrap();
    }
    for id in 1..=3 {
        store.create_stock(Stock::bare(StockId::new(id))).unwrap();
    }

    let transactions = vec![
        make_trans(2, 1, 10, 1),
        make_trans(2, 1, 10, 2),
        make_trans(2, 2, -10, 1),
        make_trans(3, 1, 10, 1),
        make_trans(3, 3, -10, 2),
        make_trans(4, 2, -10, 2),
        make_trans(4, 2, 10, 1),
        make_trans(4, 2, -10, 1),
        make_trans(4, 3, 10, 1),
    ];
    for t in transactions {
        store.append_transaction(t).unwrap();
    }

    let engine = Arc::new(OrderEngine::new(store));
    let cases: Vec<(u32, HashMap<StockId, i64>)> = vec![
        (2, HashMap::from([(StockId::new(1), 20), (StockId::new(2), -10)])),
        (3, HashMap::from([(StockId::new(1), 10), (StockId::new(3), -10)])),
        (4, HashMap::from([(StockId::new(2), -10), (StockId::new(3), 10)])),
    ];

    let handles: Vec<_> = cases
        .into_iter()
        .map(|(user, expected)| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let got = engine.stocks_owned(UserId::new(user)).expect("Did not expect error");
                assert_eq!(got, expected, "user {}", user);
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn test_position_example_from_mixed_signs() {
    let store = Arc::new(MemoryStore::new());
    for t in [make_trans(2, 1, 10, 1), make_trans(2, 1, 10, 1), make_trans(2, 1, -10, 1)] {
        store.append_transaction(t).unwrap();
    }
    for t in [make_trans(2, 2, -10, 1), make_trans(2, 2, 10, 1), make_trans(2, 2, -10, 1)] {
        store.append_transaction(t).unwrap();
    }

    let engine = OrderEngine::new(store);
    let owned = engine.stocks_owned(UserId::new(2)).unwrap();
    assert_eq!(owned[&StockId::new(1)], 10);
    assert_eq!(owned[&StockId::new(2)], -10);
}

proptest! {
    #[test]
    fn prop_stocks_owned_ignores_insertion_order(
        deltas in proptest::collection::vec((1u32..4, -50i64..50), 0..40),
        seed in any::<u64>(),
    ) {
        let mut expected: HashMap<StockId, i64> = HashMap::new();
        for &(stock, qty) in &deltas {
            *expected.entry(StockId::new(stock)).or_insert(0) += qty;
        }

        // Deterministic shuffle driven by the seed
        let mut shuffled = deltas.clone();
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }

        let store = Arc::new(MemoryStore::new());
        for (stock, qty) in shuffled {
            store.append_transaction(make_trans(2, stock, qty, 1)).unwrap();
        }
        // Another user's rows never leak in
        store.append_transaction(make_trans(3, 1, 999, 1)).unwrap();

        let engine = OrderEngine::new(store);
        prop_assert_eq!(engine.stocks_owned(UserId::new(2)).unwrap(), expected);
    }
}
