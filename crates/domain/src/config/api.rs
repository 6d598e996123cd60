use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Remote API
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default = "d_10000")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            timeout_ms: 10_000,
        }
    }
}

fn d_base_url() -> String {
    "http://localhost:3000/api".into()
}
fn d_10000() -> u64 {
    10_000
}
