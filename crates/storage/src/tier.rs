//! Retention-tier handles over a raw [`KeyStore`].

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use dash_domain::error::{Error, Result};

use crate::store::KeyStore;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Durable tier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Storage that survives reloads and restarts.  Values are JSON.
#[derive(Clone)]
pub struct DurableStore {
    inner: Arc<dyn KeyStore>,
}

impl DurableStore {
    pub fn new(inner: Arc<dyn KeyStore>) -> Self {
        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    /// Decode the JSON value under `key`.
    ///
    /// `Ok(None)` when the key is absent; [`Error::MalformedStoredValue`]
    /// when it is present but does not decode as `T`.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.inner.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| Error::MalformedStoredValue {
                key: key.to_owned(),
                source,
            })
    }

    pub fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.inner.set(key, &json)
    }
}

impl fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DurableStore")
            .field("keys", &self.inner.len())
            .finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Ephemeral tier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Session-scoped storage.  Only [`TransientStateReset`] hands these out,
/// so holding one proves the boot wipe already happened.
///
/// [`TransientStateReset`]: crate::reset::TransientStateReset
#[derive(Clone)]
pub struct EphemeralStore {
    inner: Arc<dyn KeyStore>,
}

impl EphemeralStore {
    pub(crate) fn after_reset(inner: Arc<dyn KeyStore>) -> Self {
        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for EphemeralStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralStore")
            .field("keys", &self.inner.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryKeyStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        id: String,
    }

    fn durable(entries: &[(&str, &str)]) -> DurableStore {
        DurableStore::new(Arc::new(MemoryKeyStore::seeded(
            entries.iter().map(|(k, v)| (*k, *v)),
        )))
    }

    #[test]
    fn read_json_absent_is_none() {
        let store = durable(&[]);
        assert!(store.read_json::<Probe>("user").unwrap().is_none());
    }

    #[test]
    fn read_json_round_trips() {
        let store = durable(&[]);
        store.write_json("user", &Probe { id: "u".into() }).unwrap();
        assert_eq!(
            store.read_json::<Probe>("user").unwrap(),
            Some(Probe { id: "u".into() })
        );
    }

    #[test]
    fn read_json_malformed_names_the_key() {
        let store = durable(&[("user", "{not json")]);
        match store.read_json::<Probe>("user") {
            Err(Error::MalformedStoredValue { key, .. }) => assert_eq!(key, "user"),
            other => panic!("expected MalformedStoredValue, got {other:?}"),
        }
    }

    #[test]
    fn read_json_wrong_shape_is_malformed() {
        let store = durable(&[("user", "[1,2,3]")]);
        assert!(matches!(
            store.read_json::<Probe>("user"),
            Err(Error::MalformedStoredValue { .. })
        ));
    }
}
