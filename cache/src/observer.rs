//! Persist hooks.
//!
//! Observers are notified once per slot actually written to the state
//! database, after the write succeeded. They cannot fail the flush.

use slotcache_primitives::{types::to_hex, SlotIdentity, Word};

/// Callback fired for every slot written during persist.
pub trait FlushObserver {
    /// Called with the slot and the value just written to the database.
    fn on_flush(&mut self, identity: &SlotIdentity, value: &Word);
}

impl<F> FlushObserver for F
where
    F: FnMut(&SlotIdentity, &Word),
{
    fn on_flush(&mut self, identity: &SlotIdentity, value: &Word) {
        self(identity, value)
    }
}

/// Observer that emits one `trace` event per flushed slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FlushObserver for TracingObserver {
    fn on_flush(&mut self, identity: &SlotIdentity, value: &Word) {
        tracing::trace!(
            target: "slotcache::flush",
            account = %to_hex(identity.account()),
            slot = %to_hex(identity.slot()),
            value = %to_hex(value),
            "persisted storage slot"
        );
    }
}
