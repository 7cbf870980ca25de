//! Shared test helpers for integration tests.
//!
//! Provides stable account addresses, slot/word builders, seeded
//! databases and a recording observer used across the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use slotcache::{CacheConfig, CacheStore, ExecutionContext};
use slotcache_primitives::{
    types::{slot_from_index, word_from_u64},
    Address, SlotIdentity, SlotKey, Word,
};
use slotcache_statedb::MemDatabase;

// ── Accounts ──

/// Account A in the scenarios.
pub const ADDR_A: Address = [0xaa; 20];

/// Account B, sorts after A.
pub const ADDR_B: Address = [0xbb; 20];

/// Account with the lowest possible address.
pub const ADDR_ZERO: Address = [0x00; 20];

// ── Slot / Word Builders ──

pub fn slot(index: u64) -> SlotKey {
    slot_from_index(index)
}

pub fn word(value: u64) -> Word {
    word_from_u64(value)
}

pub fn id(account: Address, index: u64) -> SlotIdentity {
    SlotIdentity::new(account, slot(index))
}

// ── Database Builders ──

/// Database holding `value` at each `(account, slot index)`.
pub fn seeded_db(entries: &[(Address, u64, u64)]) -> MemDatabase {
    let mut data = BTreeMap::new();
    for (account, index, value) in entries {
        data.insert(id(*account, *index), word(*value));
    }
    MemDatabase::with_data(data)
}

// ── Cache Builders ──

pub fn read_through_cache(db: &mut MemDatabase) -> CacheStore<&mut MemDatabase> {
    CacheStore::new(db, CacheConfig::read_through())
}

pub fn zero_on_miss_cache(db: &mut MemDatabase) -> CacheStore<&mut MemDatabase> {
    CacheStore::new(db, CacheConfig::zero_on_miss())
}

pub fn context(db: &mut MemDatabase) -> ExecutionContext<&mut MemDatabase> {
    ExecutionContext::new(db, CacheConfig::default())
}

// ── Observers ──

/// Shared log of `(identity, value)` pairs seen by a flush observer.
pub type FlushLog = Arc<Mutex<Vec<(SlotIdentity, Word)>>>;

/// Build an observer closure and the log it appends to.
pub fn recording_observer() -> (FlushLog, impl FnMut(&SlotIdentity, &Word) + Send + 'static) {
    let log: FlushLog = Arc::default();
    let sink = Arc::clone(&log);
    let observer = move |identity: &SlotIdentity, value: &Word| {
        sink.lock().unwrap().push((*identity, *value));
    };
    (log, observer)
}
