//! Composite storage slot identity.
//!
//! A `SlotIdentity` addresses one storage value across every contract
//! touched in an execution. The cache keys a single flat map by it
//! instead of nesting per-account maps.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{to_hex, Address, SlotKey};

/// `(account, slot)` pair identifying a single storage value.
///
/// Equality, hashing and ordering are structural over the raw bytes:
/// accounts compare first, then slot keys. No normalization is applied,
/// so the slot key must already match the state database's addressing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SlotIdentity {
    account: Address,
    slot: SlotKey,
}

impl SlotIdentity {
    /// Build an identity. Total: every account/slot pair is valid.
    pub const fn new(account: Address, slot: SlotKey) -> Self {
        Self { account, slot }
    }

    /// The owning account.
    pub fn account(&self) -> &Address {
        &self.account
    }

    /// The storage key within the account.
    pub fn slot(&self) -> &SlotKey {
        &self.slot
    }

    /// Split back into `(account, slot)`.
    pub fn into_parts(self) -> (Address, SlotKey) {
        (self.account, self.slot)
    }
}

impl From<(Address, SlotKey)> for SlotIdentity {
    fn from((account, slot): (Address, SlotKey)) -> Self {
        Self::new(account, slot)
    }
}

impl fmt::Display for SlotIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", to_hex(&self.account), to_hex(&self.slot))
    }
}
