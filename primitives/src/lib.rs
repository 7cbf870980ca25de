//! `slotcache-primitives` — foundational types for contract storage caching.
//!
//! This crate provides the fixed-width address, slot key and word types,
//! the hex/word helpers, and the composite [`SlotIdentity`] shared by the
//! state database abstraction and the cache itself.

pub mod types;
pub mod slot;

// Re-export commonly used types at the crate root for convenience.
pub use types::{
    Address, SlotKey, Word, ADDRESS_LEN, HASH_LEN, WORD_LEN, ZERO_ADDRESS, ZERO_WORD,
};
pub use slot::SlotIdentity;
