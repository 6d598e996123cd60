use std::time::Duration;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Scroll restoration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Length of the restore animation.
    #[serde(default = "d_800")]
    pub animation_ms: u64,
    /// Interval between animation steps (one display frame).
    #[serde(default = "d_16")]
    pub frame_ms: u64,
    /// Quiet period before a scroll offset is written back.
    #[serde(default = "d_150")]
    pub debounce_ms: u64,
    /// Prefix of the session-scoped keys holding offsets.
    #[serde(default = "d_key_prefix")]
    pub key_prefix: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            animation_ms: 800,
            frame_ms: 16,
            debounce_ms: 150,
            key_prefix: d_key_prefix(),
        }
    }
}

impl ScrollConfig {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn d_800() -> u64 {
    800
}
fn d_16() -> u64 {
    16
}
fn d_150() -> u64 {
    150
}
fn d_key_prefix() -> String {
    "scrollPos:".into()
}
