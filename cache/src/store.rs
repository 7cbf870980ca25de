//! Per-execution write-back cache over contract storage.
//!
//! `CacheStore` owns one flat map from `SlotIdentity` to `CacheEntry` for
//! the duration of a single execution context:
//!
//! - reads are served from the map, with misses handled by the configured
//!   `MissPolicy`
//! - writes only touch the map and mark the entry dirty
//! - `persist` writes every dirty entry to the state database, sorted by
//!   account then slot, and marks it clean
//!
//! Nothing reaches the database before `persist`. Dropping the store
//! without persisting discards all buffered writes.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use slotcache_primitives::{Address, SlotIdentity, SlotKey, Word, ZERO_WORD};
use slotcache_statedb::StateDatabase;
use tracing::{debug, trace, warn};

use crate::config::{CacheConfig, MissPolicy};
use crate::entry::CacheEntry;
use crate::error::{CacheError, CacheResult};
use crate::observer::{FlushObserver, TracingObserver};

/// Read/write counters for one execution context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls to `get_value`.
    pub reads: u64,
    /// Reads served from an existing entry.
    pub hits: u64,
    /// Reads that went to the miss policy.
    pub misses: u64,
    /// Calls to `set_value`.
    pub writes: u64,
}

/// Outcome of a successful `persist`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Slots written to the state database.
    pub written: usize,
    /// Cached slots that were clean and not written.
    pub skipped: usize,
}

/// Write-back storage cache for a single execution context.
///
/// Not shared across executions: each context builds its own store over
/// its own database handle (`&mut D` works as a handle). The store is
/// `Send` whenever `D` is, so a context can run on a worker thread.
pub struct CacheStore<D> {
    db: D,
    config: CacheConfig,
    entries: FxHashMap<SlotIdentity, CacheEntry>,
    observers: Vec<Box<dyn FlushObserver + Send>>,
    stats: CacheStats,
}

impl<D: StateDatabase> CacheStore<D> {
    /// Create a preloaded (empty) store in front of `db`.
    pub fn new(db: D, config: CacheConfig) -> Self {
        let mut observers: Vec<Box<dyn FlushObserver + Send>> = Vec::new();
        if config.trace_flush {
            observers.push(Box::new(TracingObserver));
        }
        let mut store = Self {
            db,
            config,
            entries: FxHashMap::default(),
            observers,
            stats: CacheStats::default(),
        };
        store.preload();
        store
    }

    /// Reset to an empty store, discarding every entry and counter.
    ///
    /// Buffered writes are dropped without reaching the database. Calling
    /// it repeatedly is harmless.
    pub fn preload(&mut self) {
        if !self.entries.is_empty() {
            debug!(
                discarded = self.entries.len(),
                dirty = self.dirty_count(),
                "storage cache reset with live entries"
            );
        }
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    /// Read the value of `slot` in `account`'s storage.
    ///
    /// A cached entry is returned as-is. On a miss, `ReadThrough` fetches
    /// from the database and caches the value as clean; `ZeroOnMiss`
    /// returns the zero word and caches nothing. Only a failing
    /// read-through can return an error, and it leaves the store unchanged.
    pub fn get_value(&mut self, account: &Address, slot: &SlotKey) -> CacheResult<Word> {
        let identity = SlotIdentity::new(*account, *slot);
        self.stats.reads += 1;

        if let Some(entry) = self.entries.get(&identity) {
            self.stats.hits += 1;
            return Ok(entry.value());
        }
        self.stats.misses += 1;

        match self.config.miss_policy {
            MissPolicy::ZeroOnMiss => Ok(ZERO_WORD),
            MissPolicy::ReadThrough => {
                let value = self
                    .db
                    .get_storage(account, slot)
                    .map_err(|source| CacheError::ReadThrough { identity, source })?;
                trace!(%identity, "storage read-through");
                self.entries.insert(identity, CacheEntry::clean(value));
                Ok(value)
            }
        }
    }

    /// Write `value` to `slot` in `account`'s storage.
    ///
    /// The write stays in memory until `persist`. Callers enforce the
    /// read-only guard before calling this.
    pub fn set_value(&mut self, account: &Address, slot: &SlotKey, value: Word) {
        let identity = SlotIdentity::new(*account, *slot);
        let clear_on_restore = self.config.clear_dirty_on_restore;
        self.stats.writes += 1;

        match self.entries.entry(identity) {
            Entry::Occupied(mut occupied) => occupied.get_mut().write(value, clear_on_restore),
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry::written(value));
            }
        }
    }

    /// Flush every dirty entry to the state database.
    ///
    /// Entries are written in ascending `(account, slot)` order and each is
    /// marked clean once its write succeeds, so persisting again without new
    /// writes is a no-op. The first database failure aborts the flush with
    /// `CacheError::Persistence`; slots before it stay written and clean,
    /// the failing slot and everything after it stay dirty.
    pub fn persist(&mut self) -> CacheResult<FlushReport> {
        let pending = self.dirty_identities();
        let mut report = FlushReport {
            written: 0,
            skipped: self.entries.len() - pending.len(),
        };

        for identity in pending {
            let Some(entry) = self.entries.get_mut(&identity) else {
                continue;
            };
            let value = entry.value();
            if let Err(source) = self.db.set_storage(identity.account(), identity.slot(), value) {
                warn!(
                    %identity,
                    written = report.written,
                    error = %source,
                    "storage flush aborted"
                );
                return Err(CacheError::Persistence { identity, source });
            }
            entry.mark_persisted();
            report.written += 1;

            for observer in self.observers.iter_mut() {
                observer.on_flush(&identity, &value);
            }
        }

        debug!(
            written = report.written,
            skipped = report.skipped,
            "storage cache persisted"
        );
        Ok(report)
    }

    /// Register a hook fired for every slot written by `persist`.
    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: FlushObserver + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Dirty identities in flush order.
    pub fn dirty_identities(&self) -> Vec<SlotIdentity> {
        let mut dirty: Vec<SlotIdentity> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_dirty())
            .map(|(identity, _)| *identity)
            .collect();
        dirty.sort_unstable();
        dirty
    }

    /// Copy of the cached entry for `identity`, if any.
    pub fn entry(&self, identity: &SlotIdentity) -> Option<CacheEntry> {
        self.entries.get(identity).copied()
    }

    /// Returns true if `identity` is cached and not yet flushed.
    pub fn is_dirty(&self, identity: &SlotIdentity) -> bool {
        self.entries.get(identity).is_some_and(CacheEntry::is_dirty)
    }

    /// Number of cached entries awaiting flush.
    pub fn dirty_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.is_dirty()).count()
    }

    /// Number of cached slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no slot has been cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read and write counters since the last preload.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Configuration the store was created with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The underlying state database.
    pub fn database(&self) -> &D {
        &self.db
    }

    /// Drop the cache and hand back the database handle.
    pub fn into_database(self) -> D {
        self.db
    }
}
