//! `slotcache-statedb` — the persistent storage interface behind the cache.
//!
//! This crate defines the state database seam the storage cache consumes:
//!
//! - `StateDatabase` trait — `get_storage` / `set_storage` per account slot
//! - `MemDatabase` — in-memory `StateDatabase` with write logging and
//!   failure injection for tests
//! - `DatabaseError` — backend error type

pub mod error;
pub mod state_db;
pub mod mem_db;

// Re-export commonly used types at the crate root.
pub use error::DatabaseError;
pub use state_db::StateDatabase;
pub use mem_db::MemDatabase;
