//! Storage cache error types.

use slotcache_primitives::SlotIdentity;
use slotcache_statedb::DatabaseError;

/// Error type for cache operations and the execution context around them.
///
/// None of these are recovered inside the cache. The owning execution
/// decides whether to abort, revert, or treat the failure as fatal.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A storage write was attempted while the execution is read-only.
    /// Raised before the store is touched.
    #[error("write to {identity} rejected: execution context is read-only")]
    WriteProtection { identity: SlotIdentity },

    /// The state database refused a write during persist. Slots flushed
    /// before this one have already been written.
    #[error("failed to persist {identity}: {source}")]
    Persistence {
        identity: SlotIdentity,
        #[source]
        source: DatabaseError,
    },

    /// The state database failed to serve a read-through miss.
    #[error("failed to read {identity} from state database: {source}")]
    ReadThrough {
        identity: SlotIdentity,
        #[source]
        source: DatabaseError,
    },
}

impl CacheError {
    /// The slot the failing operation targeted.
    pub fn identity(&self) -> &SlotIdentity {
        match self {
            Self::WriteProtection { identity }
            | Self::Persistence { identity, .. }
            | Self::ReadThrough { identity, .. } => identity,
        }
    }

    /// Returns true for a read-only violation.
    pub fn is_write_protection(&self) -> bool {
        matches!(self, Self::WriteProtection { .. })
    }

    /// Returns true for a failed flush write.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
