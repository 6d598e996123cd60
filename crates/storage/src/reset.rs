//! Boot wipe of the session-scoped tier.
//!
//! Whatever the ephemeral store holds at process start belongs to an earlier
//! load and must not leak into this one.  The reset clears a store
//! synchronously before handing out the [`EphemeralStore`] handle, and
//! clears each distinct store at most once.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use dash_domain::error::Result;
use dash_domain::trace::TraceEvent;

use crate::store::KeyStore;
use crate::tier::EphemeralStore;

static PROCESS_RESET: TransientStateReset = TransientStateReset::new();

/// What a call to [`TransientStateReset::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The store had not been seen before and was wiped.
    Cleared { keys_removed: usize },
    /// This exact store was already wiped in this lifetime; nothing was touched.
    AlreadyRan,
}

pub struct TransientStateReset {
    /// The store most recently wiped.  Held weakly so the reset never keeps a
    /// store alive; a live `Weak` also pins the allocation, so a new store can
    /// never be mistaken for the old one by address.
    cleared: Mutex<Option<Weak<dyn KeyStore>>>,
}

impl fmt::Debug for TransientStateReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransientStateReset")
            .field("has_run", &self.has_run())
            .finish()
    }
}

impl Default for TransientStateReset {
    fn default() -> Self {
        Self::new()
    }
}

impl TransientStateReset {
    pub const fn new() -> Self {
        Self {
            cleared: parking_lot::const_mutex(None),
        }
    }

    /// The instance shared by the whole process.
    pub fn process() -> &'static TransientStateReset {
        &PROCESS_RESET
    }

    pub fn has_run(&self) -> bool {
        self.cleared.lock().is_some()
    }

    /// Clear `raw` unless it is the store this reset already cleared, then
    /// return the ephemeral handle.
    ///
    /// Handing back the same store skips the wipe: clearing mid-session
    /// would throw away offsets the current session recorded.  Any other
    /// store is wiped first.  If the wipe fails the reset keeps its previous
    /// state so the caller can retry.
    pub fn run(&self, raw: Arc<dyn KeyStore>) -> Result<(EphemeralStore, ResetOutcome)> {
        let mut cleared = self.cleared.lock();

        let seen = cleared
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|prev| Arc::ptr_eq(&prev, &raw));
        if seen {
            tracing::debug!("transient state reset already ran for this store");
            return Ok((EphemeralStore::after_reset(raw), ResetOutcome::AlreadyRan));
        }

        let keys_removed = raw.len();
        raw.clear()?;
        *cleared = Some(Arc::downgrade(&raw));
        drop(cleared);

        TraceEvent::TransientStateCleared { keys_removed }.emit();

        Ok((
            EphemeralStore::after_reset(raw),
            ResetOutcome::Cleared { keys_removed },
        ))
    }
}
