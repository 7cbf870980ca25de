//! Cached slot value with dirty tracking.

use slotcache_primitives::Word;

/// In-memory state of one cached storage slot.
///
/// `dirty` is tracked explicitly rather than recomputed at flush time.
/// `persisted` is the value the cache knows the database holds, if any:
/// set by a read-through or a successful flush, unknown for slots that
/// were written blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    value: Word,
    dirty: bool,
    persisted: Option<Word>,
}

impl CacheEntry {
    /// Entry for a value just fetched from the database.
    pub(crate) fn clean(value: Word) -> Self {
        Self {
            value,
            dirty: false,
            persisted: Some(value),
        }
    }

    /// Entry for a slot written before it was ever read.
    pub(crate) fn written(value: Word) -> Self {
        Self {
            value,
            dirty: true,
            persisted: None,
        }
    }

    /// Overwrite the value.
    ///
    /// With `clear_on_restore`, writing back the known persisted value
    /// leaves the entry clean.
    pub(crate) fn write(&mut self, value: Word, clear_on_restore: bool) {
        self.value = value;
        self.dirty = !(clear_on_restore && self.persisted == Some(value));
    }

    /// Record that the current value reached the database.
    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = Some(self.value);
        self.dirty = false;
    }

    /// Current in-memory value.
    pub fn value(&self) -> Word {
        self.value
    }

    /// Whether the value still has to be flushed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last value known to be in the database.
    pub fn persisted_value(&self) -> Option<Word> {
        self.persisted
    }
}
