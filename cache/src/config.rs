//! Cache configuration.
//!
//! The miss policy is explicit configuration rather than an implicit
//! property of the store, so every integrator states which read semantics
//! its interpreter relies on.

use serde::{Deserialize, Serialize};

/// What a read does when the slot has not been touched in this execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Fetch from the state database, cache the value as a clean entry
    /// and return it. Every slot read once is served from memory after.
    #[default]
    ReadThrough,
    /// Return the zero word without contacting the database and without
    /// creating an entry.
    ZeroOnMiss,
}

/// Configuration for a single execution's storage cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Behavior of reads on untouched slots.
    pub miss_policy: MissPolicy,
    /// Clear the dirty flag when a write restores the last persisted
    /// value, so the flush skips the slot.
    pub clear_dirty_on_restore: bool,
    /// Emit a `trace` event for every slot written during persist.
    pub trace_flush: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            miss_policy: MissPolicy::ReadThrough,
            clear_dirty_on_restore: true,
            trace_flush: false,
        }
    }
}

impl CacheConfig {
    /// Default configuration with read-through misses.
    pub fn read_through() -> Self {
        Self::default()
    }

    /// Default configuration with zero-on-miss reads.
    pub fn zero_on_miss() -> Self {
        Self {
            miss_policy: MissPolicy::ZeroOnMiss,
            ..Self::default()
        }
    }
}
