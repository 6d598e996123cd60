use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Storage tiers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the durable store file (`durable.json`).
    #[serde(default = "d_state_path")]
    pub state_path: PathBuf,
    /// File backing the session-scoped store.  `None` keeps it in memory,
    /// which is the right thing for a process that is itself one session.
    #[serde(default)]
    pub ephemeral_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: d_state_path(),
            ephemeral_path: None,
        }
    }
}

impl StorageConfig {
    pub fn durable_file(&self) -> PathBuf {
        self.state_path.join("durable.json")
    }
}

fn d_state_path() -> PathBuf {
    PathBuf::from("./data/state")
}
