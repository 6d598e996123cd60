use dash_domain::error::Result;

/// String key/value storage with local-storage semantics: synchronous,
/// fast, shared by the whole process.
pub trait KeyStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Drop every entry.
    fn clear(&self) -> Result<()>;

    fn keys(&self) -> Vec<String>;

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
