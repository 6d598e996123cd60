use std::collections::BTreeMap;

use parking_lot::RwLock;

use dash_domain::error::Result;

use crate::store::KeyStore;

/// In-memory [`KeyStore`].  Backs the ephemeral tier by default and every
/// test double.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate, e.g. to simulate what a previous page load left behind.
    pub fn seeded<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
