//! Backend state database abstraction.
//!
//! `StateDatabase` is the persistent account storage that the cache sits in
//! front of. The cache is its only caller during an execution: reads go
//! through it on a cache miss, writes go through it only at persist time.
//!
//! Implementations:
//! - `MemDatabase` (this crate) — in-memory BTreeMap for testing
//! - trie-backed stores, provided by the embedding node

use slotcache_primitives::{Address, SlotKey, Word};

use crate::error::DatabaseError;

/// Persistent per-account key/value storage.
///
/// Slots that were never written read as the zero word. Implementations
/// must be `Send + Sync` so an execution context can be moved to, or
/// inspected from, a worker thread.
pub trait StateDatabase: Send + Sync {
    /// Read the committed value of `slot` in `account`'s storage.
    fn get_storage(&self, account: &Address, slot: &SlotKey) -> Result<Word, DatabaseError>;

    /// Store `value` at `slot` in `account`'s storage.
    fn set_storage(
        &mut self,
        account: &Address,
        slot: &SlotKey,
        value: Word,
    ) -> Result<(), DatabaseError>;
}

impl<T: StateDatabase + ?Sized> StateDatabase for &mut T {
    fn get_storage(&self, account: &Address, slot: &SlotKey) -> Result<Word, DatabaseError> {
        (**self).get_storage(account, slot)
    }

    fn set_storage(
        &mut self,
        account: &Address,
        slot: &SlotKey,
        value: Word,
    ) -> Result<(), DatabaseError> {
        (**self).set_storage(account, slot, value)
    }
}

impl<T: StateDatabase + ?Sized> StateDatabase for Box<T> {
    fn get_storage(&self, account: &Address, slot: &SlotKey) -> Result<Word, DatabaseError> {
        (**self).get_storage(account, slot)
    }

    fn set_storage(
        &mut self,
        account: &Address,
        slot: &SlotKey,
        value: Word,
    ) -> Result<(), DatabaseError> {
        (**self).set_storage(account, slot, value)
    }
}
