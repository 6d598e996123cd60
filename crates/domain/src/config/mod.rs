mod api;
mod routes;
mod scroll;
mod storage;

pub use api::*;
pub use routes::*;
pub use scroll::*;
pub use storage::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.api.base_url.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "api.base_url".into(),
                message: "base_url must not be empty".into(),
            });
        }

        if self.api.timeout_ms == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "api.timeout_ms".into(),
                message: "timeout must be greater than 0".into(),
            });
        }

        for (field, path) in [
            ("routes.login_path", &self.routes.login_path),
            ("routes.landing_path", &self.routes.landing_path),
        ] {
            if !path.starts_with('/') {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: field.into(),
                    message: format!("\"{path}\" must be an absolute path"),
                });
            }
        }

        if self.routes.callback_param.trim().is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "routes.callback_param".into(),
                message: "callback parameter name must not be empty".into(),
            });
        }

        if self.routes.is_public(&self.routes.landing_path) {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "routes.landing_path".into(),
                message: "landing path is public, signed-in users land outside the guard"
                    .into(),
            });
        }

        if self.scroll.frame_ms == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "scroll.frame_ms".into(),
                message: "frame interval must be greater than 0".into(),
            });
        } else if self.scroll.animation_ms < self.scroll.frame_ms {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "scroll.animation_ms".into(),
                message: "animation is shorter than one frame and will jump".into(),
            });
        }

        if self.scroll.debounce_ms == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "scroll.debounce_ms".into(),
                message: "a zero quiet period writes on every scroll event".into(),
            });
        }

        if self.scroll.key_prefix.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "scroll.key_prefix".into(),
                message: "key prefix must not be empty".into(),
            });
        }

        errors
    }
}
