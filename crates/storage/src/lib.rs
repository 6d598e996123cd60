//! Client-side key/value storage.
//!
//! Two retention tiers share one [`KeyStore`] contract: the durable tier
//! survives restarts, the ephemeral tier lives for one session and is wiped
//! at boot by [`TransientStateReset`].  The only way to get an
//! [`EphemeralStore`] is through that reset, so nothing can read the
//! session-scoped tier before it has been cleared.

pub mod file;
pub mod memory;
pub mod reset;
pub mod store;
pub mod tier;

pub use file::FileKeyStore;
pub use memory::MemoryKeyStore;
pub use reset::{ResetOutcome, TransientStateReset};
pub use store::KeyStore;
pub use tier::{DurableStore, EphemeralStore};
