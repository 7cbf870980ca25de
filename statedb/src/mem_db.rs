//! In-memory state database for testing.
//!
//! `MemDatabase` implements `StateDatabase` using a `BTreeMap` keyed by
//! `SlotIdentity`, so iteration is sorted by account then slot. It also
//! records every write it accepts and can be told to reject writes to
//! particular slots, which lets tests observe exactly what a flush did.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use slotcache_primitives::{Address, SlotIdentity, SlotKey, Word, ZERO_WORD};

use crate::error::DatabaseError;
use crate::state_db::StateDatabase;

/// In-memory state database backed by `BTreeMap`.
///
/// Storing the zero word removes the slot, mirroring how account storage
/// tries drop cleared slots.
#[derive(Debug, Default)]
pub struct MemDatabase {
    data: BTreeMap<SlotIdentity, Word>,
    /// Every accepted `set_storage` call, in call order.
    write_log: Vec<(SlotIdentity, Word)>,
    /// Slots whose writes fail with `WriteRejected`.
    rejected: BTreeSet<SlotIdentity>,
    reads: AtomicU64,
}

impl Clone for MemDatabase {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            write_log: self.write_log.clone(),
            rejected: self.rejected.clone(),
            reads: AtomicU64::new(self.read_count()),
        }
    }
}

impl MemDatabase {
    /// Create a new empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a database pre-populated with data.
    pub fn with_data(data: BTreeMap<SlotIdentity, Word>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Seed a value directly, bypassing the write log.
    pub fn insert(&mut self, identity: SlotIdentity, value: Word) {
        if value == ZERO_WORD {
            self.data.remove(&identity);
        } else {
            self.data.insert(identity, value);
        }
    }

    /// Current value at `identity`, zero if unset.
    pub fn storage(&self, identity: &SlotIdentity) -> Word {
        self.data.get(identity).copied().unwrap_or(ZERO_WORD)
    }

    /// Make every future write to `identity` fail.
    pub fn reject_writes_to(&mut self, identity: SlotIdentity) {
        self.rejected.insert(identity);
    }

    /// Stop rejecting writes to `identity`.
    pub fn accept_writes_to(&mut self, identity: &SlotIdentity) {
        self.rejected.remove(identity);
    }

    /// Accepted writes, in the order they were applied.
    pub fn writes(&self) -> &[(SlotIdentity, Word)] {
        &self.write_log
    }

    /// Forget the recorded writes (the stored data is kept).
    pub fn clear_write_log(&mut self) {
        self.write_log.clear();
    }

    /// Number of `get_storage` calls served so far.
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Non-zero slots, sorted by account then slot.
    pub fn data(&self) -> &BTreeMap<SlotIdentity, Word> {
        &self.data
    }

    /// Returns the number of non-zero slots.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if every slot is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StateDatabase for MemDatabase {
    fn get_storage(&self, account: &Address, slot: &SlotKey) -> Result<Word, DatabaseError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.storage(&SlotIdentity::new(*account, *slot)))
    }

    fn set_storage(
        &mut self,
        account: &Address,
        slot: &SlotKey,
        value: Word,
    ) -> Result<(), DatabaseError> {
        let identity = SlotIdentity::new(*account, *slot);
        if self.rejected.contains(&identity) {
            return Err(DatabaseError::WriteRejected(identity));
        }
        self.insert(identity, value);
        self.write_log.push((identity, value));
        Ok(())
    }
}
