use dash_domain::config::{Config, ConfigSeverity};

#[test]
fn default_scroll_timings() {
    let config = Config::default();
    assert_eq!(config.scroll.animation_ms, 800);
    assert_eq!(config.scroll.debounce_ms, 150);
    assert_eq!(config.scroll.key_prefix, "scrollPos:");
}

#[test]
fn default_routes_point_at_login() {
    let config = Config::default();
    assert_eq!(config.routes.login_path, "/login");
    assert_eq!(config.routes.callback_param, "callbackUrl");
    assert!(config.routes.is_public("/login"));
    assert!(!config.routes.is_public("/dashboard"));
}

#[test]
fn default_config_validates_clean() {
    assert!(Config::default().validate().is_empty());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let toml_str = r#"
[scroll]
debounce_ms = 300

[routes]
login_path = "/sign-in"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.scroll.debounce_ms, 300);
    assert_eq!(config.scroll.animation_ms, 800);
    assert_eq!(config.routes.login_path, "/sign-in");
    assert_eq!(config.routes.callback_param, "callbackUrl");
    assert_eq!(config.api.timeout_ms, 10_000);
}

#[test]
fn storage_paths_parse() {
    let toml_str = r#"
[storage]
state_path = "/var/lib/dash"
ephemeral_path = "/tmp/dash-session.json"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(
        config.storage.durable_file(),
        std::path::PathBuf::from("/var/lib/dash/durable.json")
    );
    assert!(config.storage.ephemeral_path.is_some());
}

#[test]
fn relative_login_path_is_an_error() {
    let mut config = Config::default();
    config.routes.login_path = "login".into();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error && i.field == "routes.login_path"));
}

#[test]
fn zero_frame_interval_is_an_error() {
    let mut config = Config::default();
    config.scroll.frame_ms = 0;
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error && i.field == "scroll.frame_ms"));
}

#[test]
fn public_landing_path_is_a_warning() {
    let mut config = Config::default();
    config.routes.landing_path = "/".into();
    let issues = config.validate();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, ConfigSeverity::Warning);
    assert!(issues[0].to_string().starts_with("[WARN] routes.landing_path"));
}
