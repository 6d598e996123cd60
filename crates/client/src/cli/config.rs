//! `dash config`: check the dashboard config and print it resolved.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use dash_domain::config::{Config, ConfigError, ConfigSeverity};

/// Issues found in one config file, grouped by top-level section.
pub struct ConfigReport {
    source: String,
    sections: BTreeMap<String, Vec<ConfigError>>,
}

impl ConfigReport {
    pub fn check(config: &Config, source: &str) -> Self {
        let mut sections: BTreeMap<String, Vec<ConfigError>> = BTreeMap::new();
        for issue in config.validate() {
            let section = issue
                .field
                .split_once('.')
                .map_or(issue.field.as_str(), |(head, _)| head)
                .to_owned();
            sections.entry(section).or_default().push(issue);
        }
        Self {
            source: source.to_owned(),
            sections,
        }
    }

    fn count(&self, severity: ConfigSeverity) -> usize {
        self.sections
            .values()
            .flatten()
            .filter(|i| i.severity == severity)
            .count()
    }

    /// Usable for boot: warnings alone do not block it.
    pub fn is_usable(&self) -> bool {
        self.count(ConfigSeverity::Error) == 0
    }

    pub fn render(&self) -> String {
        if self.sections.is_empty() {
            return format!("{}: no issues\n", self.source);
        }

        let mut out = String::new();
        for (section, issues) in &self.sections {
            let _ = writeln!(out, "[{section}]");
            for issue in issues {
                let _ = writeln!(out, "  {issue}");
            }
        }
        let _ = writeln!(
            out,
            "{}: {} error(s), {} warning(s)",
            self.source,
            self.count(ConfigSeverity::Error),
            self.count(ConfigSeverity::Warning),
        );
        out
    }
}

/// Print the report plus where the stores will live.  Returns whether the
/// config can boot a client.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let report = ConfigReport::check(config, config_path);
    print!("{}", report.render());

    println!("durable store:   {}", config.storage.durable_file().display());
    match &config.storage.ephemeral_path {
        Some(path) => println!("session store:   {}", path.display()),
        None => println!("session store:   in memory"),
    }

    report.is_usable()
}

/// Print the config with every default filled in, as TOML.
pub fn show(config: &Config) -> anyhow::Result<()> {
    let resolved = toml::to_string_pretty(config)
        .map_err(|e| anyhow::anyhow!("rendering resolved config: {e}"))?;
    print!("{resolved}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_report_no_issues() {
        let report = ConfigReport::check(&Config::default(), "dashboard.toml");
        assert!(report.is_usable());
        assert_eq!(report.render(), "dashboard.toml: no issues\n");
    }

    #[test]
    fn issues_are_grouped_by_section() {
        let mut config = Config::default();
        config.routes.login_path = "login".into();
        config.api.timeout_ms = 0;

        let report = ConfigReport::check(&config, "bad.toml");
        assert!(!report.is_usable());

        let rendered = report.render();
        let api = rendered.find("[api]").unwrap();
        let routes = rendered.find("[routes]").unwrap();
        assert!(api < routes);
        assert!(rendered.contains("routes.login_path"));
        assert!(rendered.ends_with("bad.toml: 2 error(s), 0 warning(s)\n"));
    }

    #[test]
    fn warnings_alone_still_boot() {
        let mut config = Config::default();
        config.routes.landing_path = "/register".into();

        let report = ConfigReport::check(&config, "warn.toml");
        assert!(report.is_usable());
        assert!(report.render().contains("0 error(s), 1 warning(s)"));
    }
}
