use serde::Serialize;

/// Structured trace events emitted across all dashboard client crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    TransientStateCleared {
        keys_removed: usize,
    },
    SessionHydrated {
        has_user: bool,
        has_account: bool,
        malformed_keys: Vec<String>,
    },
    SessionLoggedIn {
        user_id: String,
        account_id: String,
    },
    SessionLoggedOut {
        keys_removed: Vec<String>,
    },
    WorkspaceHydrated {
        chatbot_id: Option<String>,
    },
    WorkspaceSelected {
        chatbot_id: Option<String>,
    },
    GuardRedirect {
        from: String,
        to: String,
    },
    ScrollRestored {
        route_key: String,
        target: u64,
        duration_ms: u64,
    },
    ScrollPositionSaved {
        route_key: String,
        offset: u64,
    },
    ApiCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "dash_event");
    }
}
