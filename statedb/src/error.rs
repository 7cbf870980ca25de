//! State database error type.

use slotcache_primitives::SlotIdentity;

/// Error returned by a [`StateDatabase`](crate::StateDatabase) backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    /// The backend could not be reached or is shutting down.
    #[error("state database unavailable: {0}")]
    Unavailable(String),

    /// The backend refused to store a value for this slot.
    #[error("state database rejected write to {0}")]
    WriteRejected(SlotIdentity),

    /// Any other backend failure.
    #[error("internal state database error: {0}")]
    Internal(String),
}
