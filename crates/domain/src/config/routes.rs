use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Routes & access
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Where the guard sends signed-out users and which paths it leaves alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "d_login_path")]
    pub login_path: String,

    /// Query parameter carrying the path to return to after sign-in.
    #[serde(default = "d_callback_param")]
    pub callback_param: String,

    /// Where a successful sign-in lands when no usable callback was given.
    #[serde(default = "d_landing_path")]
    pub landing_path: String,

    /// Paths rendered without a session.  Matched exactly, or as a prefix
    /// when the entry ends in `/*`.  The login path is always public.
    #[serde(default = "d_public_paths")]
    pub public_paths: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login_path: d_login_path(),
            callback_param: d_callback_param(),
            landing_path: d_landing_path(),
            public_paths: d_public_paths(),
        }
    }
}

impl RoutesConfig {
    /// Whether `path` renders without a session.
    ///
    /// Both `path` and the configured entries are compared in canonical
    /// form, so `/register/` in the config matches a visit to `/register`.
    pub fn is_public(&self, path: &str) -> bool {
        let path = canonical_path(path);
        if path == canonical_path(&self.login_path) {
            return true;
        }
        self.public_paths.iter().any(|pattern| {
            match pattern.strip_suffix("/*") {
                Some(prefix) => {
                    let prefix = canonical_path(prefix);
                    prefix == "/" || path == prefix || path.starts_with(&format!("{prefix}/"))
                }
                None => path == canonical_path(pattern),
            }
        })
    }
}

/// Path without query or fragment, repeated slashes collapsed and no
/// trailing slash.  The root stays `/`.
fn canonical_path(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let mut canonical = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        canonical.push('/');
        canonical.push_str(segment);
    }
    if canonical.is_empty() {
        canonical.push('/');
    }
    canonical
}

// ── serde default helpers ───────────────────────────────────────────

fn d_login_path() -> String {
    "/login".into()
}
fn d_callback_param() -> String {
    "callbackUrl".into()
}
fn d_landing_path() -> String {
    "/dashboard".into()
}
fn d_public_paths() -> Vec<String> {
    vec![
        "/".into(),
        "/login".into(),
        "/register".into(),
        "/forgot-password".into(),
    ]
}
