use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dash_client::cli::{self, Cli, Command, ConfigCommand};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_tracing();

    match cli.command {
        None | Some(Command::Status) => {
            let (config, _) = cli::load_config()?;
            cli::session::status(Arc::new(config)).await
        }
        Some(Command::Login {
            email,
            password,
            callback,
        }) => {
            let (config, _) = cli::load_config()?;
            cli::session::login(Arc::new(config), email, password, callback).await
        }
        Some(Command::Logout) => {
            let (config, _) = cli::load_config()?;
            cli::session::logout(Arc::new(config)).await
        }
        Some(Command::Chatbots(cmd)) => {
            let (config, _) = cli::load_config()?;
            cli::chatbots::run(Arc::new(config), cmd).await
        }
        Some(Command::Visit { paths, scroll }) => {
            let (config, _) = cli::load_config()?;
            cli::visit::run(Arc::new(config), paths, scroll).await
        }
        Some(Command::Config(ConfigCommand::Validate)) => {
            let (config, config_path) = cli::load_config()?;
            if !cli::config::validate(&config, &config_path) {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Config(ConfigCommand::Show)) => {
            let (config, _) = cli::load_config()?;
            cli::config::show(&config)
        }
    }
}

/// Compact stderr-only tracing.  Defaults to `warn` so diagnostics stay off
/// stdout; `RUST_LOG=info` surfaces the structured trace events.
fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
