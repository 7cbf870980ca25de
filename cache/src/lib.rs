//! `slotcache` — per-execution write-back cache for contract storage.
//!
//! The interpreter routes every storage load and store of one execution
//! context through this cache instead of the state database. Reads are
//! served from memory after the first access, writes are buffered with a
//! dirty flag, and only the net dirty set is flushed to the database at
//! the commit point.
//!
//! ## Architecture
//!
//! - [`store::CacheStore`] — flat `SlotIdentity → CacheEntry` map with
//!   preload / get / set / persist
//! - [`entry::CacheEntry`] — cached word plus explicit dirty tracking
//! - [`config::CacheConfig`] — miss policy and flush options
//! - [`observer::FlushObserver`] — per-slot hook fired during persist
//! - [`context::ExecutionContext`] — SLOAD/SSTORE entry points with the
//!   read-only guard and single commit/discard
//!
//! The state database itself lives behind
//! [`slotcache_statedb::StateDatabase`].

pub mod error;
pub mod config;
pub mod entry;
pub mod observer;
pub mod store;
pub mod context;

pub use error::{CacheError, CacheResult};
pub use config::{CacheConfig, MissPolicy};
pub use entry::CacheEntry;
pub use observer::{FlushObserver, TracingObserver};
pub use store::{CacheStats, CacheStore, FlushReport};
pub use context::{CommitFailure, ExecutionContext};
