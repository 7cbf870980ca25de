//! Interpreter-facing storage access for one execution context.
//!
//! `ExecutionContext` is what the opcode layer holds: SLOAD and SSTORE go
//! through [`sload`](ExecutionContext::sload) and
//! [`sstore`](ExecutionContext::sstore), and the context ends with exactly
//! one of [`commit`](ExecutionContext::commit) or
//! [`discard`](ExecutionContext::discard). Both consume the context, so a
//! store can never be persisted twice or reused after commit. A failed
//! commit hands the context back inside a [`CommitFailure`], so the
//! caller keeps the database handle and can retry or discard.

use core::fmt;

use slotcache_primitives::{Address, SlotIdentity, SlotKey, Word};
use slotcache_statedb::StateDatabase;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::observer::FlushObserver;
use crate::store::{CacheStore, FlushReport};

/// Storage view of a single contract execution.
pub struct ExecutionContext<D> {
    cache: CacheStore<D>,
    read_only: bool,
}

impl<D: StateDatabase> ExecutionContext<D> {
    /// Start a writable execution with a freshly preloaded cache.
    pub fn new(db: D, config: CacheConfig) -> Self {
        Self {
            cache: CacheStore::new(db, config),
            read_only: false,
        }
    }

    /// Start the execution in read-only (static call) mode or not.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Enter or leave read-only mode, e.g. around a static sub-call.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Whether storage writes are currently rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Storage load.
    pub fn sload(&mut self, account: &Address, slot: &SlotKey) -> CacheResult<Word> {
        self.cache.get_value(account, slot)
    }

    /// Storage store. Rejected with `WriteProtection` in read-only mode,
    /// in which case the cache is not touched.
    pub fn sstore(&mut self, account: &Address, slot: &SlotKey, value: Word) -> CacheResult<()> {
        if self.read_only {
            return Err(CacheError::WriteProtection {
                identity: SlotIdentity::new(*account, *slot),
            });
        }
        self.cache.set_value(account, slot, value);
        Ok(())
    }

    /// Register a persist hook on the underlying cache.
    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: FlushObserver + Send + 'static,
    {
        self.cache.add_observer(observer);
    }

    /// Read access to the underlying cache.
    pub fn cache(&self) -> &CacheStore<D> {
        &self.cache
    }

    /// Persist all buffered writes and end the execution.
    ///
    /// On failure the context comes back in the `CommitFailure`. Slots
    /// flushed before the failing one are already in the database, so the
    /// surrounding call should be treated as failed; the caller may retry
    /// the commit or take the database back with
    /// [`CommitFailure::into_database`].
    pub fn commit(mut self) -> Result<(FlushReport, D), CommitFailure<D>> {
        match self.cache.persist() {
            Ok(report) => Ok((report, self.cache.into_database())),
            Err(error) => Err(CommitFailure {
                error,
                context: self,
            }),
        }
    }

    /// End the execution without writing anything, e.g. on revert.
    pub fn discard(self) -> D {
        let dirty = self.cache.dirty_count();
        if dirty > 0 {
            debug!(dirty, "storage cache discarded");
        }
        self.cache.into_database()
    }
}

/// A commit that stopped at a database failure.
pub struct CommitFailure<D> {
    /// The persistence error.
    pub error: CacheError,
    /// The context, with the failing slot and every later one still dirty.
    pub context: ExecutionContext<D>,
}

impl<D: StateDatabase> CommitFailure<D> {
    /// Give up on the execution and recover the database handle.
    pub fn into_database(self) -> D {
        self.context.discard()
    }
}

impl<D> fmt::Debug for CommitFailure<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitFailure")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<D> fmt::Display for CommitFailure<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "commit failed: {}", self.error)
    }
}

impl<D> std::error::Error for CommitFailure<D> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
