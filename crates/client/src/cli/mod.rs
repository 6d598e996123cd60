pub mod chatbots;
pub mod config;
pub mod session;
pub mod visit;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use dash_domain::config::Config;

use crate::bootstrap;
use crate::state::AppContext;

/// dashctl: drive the chatbot dashboard's session and navigation state from
/// a terminal.
#[derive(Debug, Parser)]
#[command(name = "dashctl", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show who is signed in and which workspace is active (default).
    Status,
    /// Sign in against the dashboard API.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Where to go after signing in (same-origin path).
        #[arg(long)]
        callback: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Chatbot workspace selection.
    #[command(subcommand)]
    Chatbots(ChatbotsCommand),
    /// Navigate through one or more locations and report what each renders.
    Visit {
        /// Locations to open, in order (e.g. "/dashboard" "/chat-history?page=2").
        #[arg(required = true)]
        paths: Vec<String>,
        /// Scroll each page to this offset before leaving it.
        #[arg(long)]
        scroll: Option<f64>,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum ChatbotsCommand {
    /// List the signed-in account's chatbots.
    List,
    /// Make a chatbot the active workspace.
    Select {
        /// Chatbot id.
        id: String,
    },
    /// Clear the active workspace.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `DASH_CONFIG` (or
/// `dashboard.toml` by default).  Returns the parsed [`Config`] and the
/// path that was used.
pub fn load_config() -> anyhow::Result<(Config, String)> {
    let config_path = std::env::var("DASH_CONFIG").unwrap_or_else(|_| "dashboard.toml".into());

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        Config::default()
    };

    Ok((config, config_path))
}

/// Open the configured stores and boot a client at `location`.
pub async fn open_context(config: Arc<Config>, location: &str) -> anyhow::Result<AppContext> {
    let (durable, ephemeral) = bootstrap::open_storage(&config.storage)?;
    let mut ctx = bootstrap::boot(config, durable, ephemeral, location).await?;
    ctx.settle().await;
    Ok(ctx)
}
