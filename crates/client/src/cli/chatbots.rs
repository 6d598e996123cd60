use std::sync::Arc;

use anyhow::Context;

use dash_domain::config::Config;

use crate::api::RestDashboardApi;
use crate::login::LoginFlow;

use super::{open_context, ChatbotsCommand};

pub async fn run(config: Arc<Config>, cmd: ChatbotsCommand) -> anyhow::Result<()> {
    let api = Arc::new(RestDashboardApi::new(&config.api)?);
    let ctx = open_context(config, "/").await?;
    let flow = LoginFlow::new(api, &ctx);

    match cmd {
        ChatbotsCommand::List => {
            let selected = ctx.workspace.snapshot().selected_chatbot.map(|c| c.id);
            let chatbots = flow.chatbots().await.context("listing chatbots")?;
            if chatbots.is_empty() {
                println!("No chatbots for this account");
            }
            for bot in chatbots {
                let marker = if selected.as_deref() == Some(bot.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {:<24} {}", bot.id, bot.display_name());
            }
        }
        ChatbotsCommand::Select { id } => {
            let bot = flow
                .choose_chatbot(&id)
                .await
                .with_context(|| format!("selecting chatbot {id}"))?;
            println!("Active workspace: {} ({})", bot.display_name(), bot.id);
        }
        ChatbotsCommand::Clear => {
            ctx.workspace
                .select_chatbot(None)
                .context("clearing workspace selection")?;
            println!("Workspace selection cleared");
        }
    }
    Ok(())
}
