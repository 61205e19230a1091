//! Per-user lock registry
//!
//! Every operation that reads a user's balance and then writes an order (or
//! a settlement) runs while holding that user's mutex. Handles are created
//! on first use through the map's entry API, so two callers racing on a new
//! user always end up with the same handle.
//!
//! `parking_lot::Mutex` does not poison: a panic inside a critical section
//! unwinds the guard and the next caller proceeds normally.

use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use types::ids::UserId;

/// Shared handle for one user's critical section
pub type UserLock = Arc<Mutex<()>>;

/// Maps user ids to their lock handles
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<UserId, UserLock>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Handle for `user_id`, created if this is the first request for it
    pub fn lock_for(&self, user_id: UserId) -> UserLock {
        self.locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Run `f` while holding `user_id`'s lock
    ///
    /// The guard is dropped on every exit path of `f`, panics included.
    pub fn with_lock<T>(&self, user_id: UserId, f: impl FnOnce() -> T) -> T {
        let handle = self.lock_for(user_id);
        let _guard: MutexGuard<'_, ()> = handle.lock();
        f()
    }

    /// Drop handles nobody outside the registry holds
    ///
    /// Returns the number of entries removed. A caller that obtained a handle
    /// before pruning keeps using it; the shard lock taken by `retain` stops
    /// `lock_for` from handing out a handle that is being removed.
    pub fn prune_idle(&self) -> usize {
        let before = self.locks.len();
        self.locks.retain(|_, handle| Arc::strong_count(handle) > 1);
        before.saturating_sub(self.locks.len())
    }

    /// Remove one user's handle
    pub fn forget(&self, user_id: UserId) -> bool {
        self.locks.remove(&user_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
