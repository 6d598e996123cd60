use std::sync::Arc;

use anyhow::Context;

use dash_domain::config::Config;
use dash_storage::ResetOutcome;

use crate::api::{Credentials, RestDashboardApi};
use crate::login::LoginFlow;
use crate::state::AppContext;

use super::open_context;

pub async fn status(config: Arc<Config>) -> anyhow::Result<()> {
    let ctx = open_context(config, "/").await?;
    print!("{}", describe(&ctx));
    Ok(())
}

pub async fn login(
    config: Arc<Config>,
    email: String,
    password: String,
    callback: Option<String>,
) -> anyhow::Result<()> {
    let api = Arc::new(RestDashboardApi::new(&config.api)?);
    let login_page = config.routes.login_path.clone();
    let ctx = open_context(config, &login_page).await?;

    let flow = LoginFlow::new(api, &ctx);
    let credentials = Credentials::new(email, password);
    let target = flow
        .sign_in(&credentials, callback.as_deref())
        .await
        .context("signing in")?;

    println!("Signed in, continuing to {target}");
    Ok(())
}

pub async fn logout(config: Arc<Config>) -> anyhow::Result<()> {
    let mut ctx = open_context(config, "/").await?;
    if !ctx.session.snapshot().is_authenticated() {
        println!("Not signed in");
        return Ok(());
    }

    ctx.session.logout().context("clearing stored session")?;
    ctx.settle().await;
    println!("Signed out, now at {}", ctx.router.location());
    Ok(())
}

/// Human-readable summary of a booted context.
pub fn describe(ctx: &AppContext) -> String {
    let session = ctx.session.snapshot();
    let mut out = String::new();

    match &session.user {
        Some(user) => {
            let email = user
                .attribute("email")
                .and_then(|v| v.as_str())
                .map(|e| format!(" ({e})"))
                .unwrap_or_default();
            out.push_str(&format!("session:   signed in as {}{email}\n", user.id));
        }
        None => out.push_str("session:   signed out\n"),
    }
    if let Some(account) = &session.account {
        out.push_str(&format!("account:   {}\n", account.id));
    }
    match ctx.workspace.snapshot().selected_chatbot {
        Some(bot) => out.push_str(&format!(
            "workspace: {} ({})\n",
            bot.display_name(),
            bot.id
        )),
        None => out.push_str("workspace: none selected\n"),
    }
    if let ResetOutcome::Cleared { keys_removed } = ctx.reset {
        if keys_removed > 0 {
            out.push_str(&format!("reset:     dropped {keys_removed} stale session key(s)\n"));
        }
    }
    out.push_str(&format!("location:  {}\n", ctx.router.location()));
    out
}
