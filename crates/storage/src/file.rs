//! JSON-file backed [`KeyStore`].
//!
//! The whole map lives in memory and is mirrored to a single JSON object on
//! every mutation.  Writes go through a sibling temp file and a rename so a
//! crash leaves either the old or the new file, never a torn one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use dash_domain::error::{Error, Result};

use crate::store::KeyStore;

pub struct FileKeyStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKeyStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store.  A file that is not a JSON object
    /// of strings is logged and treated as empty; it gets replaced on the
    /// next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(Error::Io)?;
            }
        }

        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(Error::Io)?;
            match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "key store file is corrupt, starting empty"
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            entries = entries.len(),
            path = %path.display(),
            "key store loaded"
        );

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(Error::Io)?;
        std::fs::rename(&tmp, &self.path).map_err(Error::Io)?;
        Ok(())
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&entries)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write();
        entries.clear();
        self.flush(&entries)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
