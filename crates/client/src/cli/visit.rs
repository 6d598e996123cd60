use std::sync::Arc;
use std::time::Duration;

use dash_domain::config::Config;
use dash_domain::Navigator;
use dash_navigation::{GuardRender, Viewport};

use super::open_context;

/// Walk through `paths` like a user clicking links, printing what the guard
/// decided and where the viewport ended up on each.  With `scroll`, every
/// page is scrolled there and left after the position has been saved, so
/// revisiting a path shows the restoration.
pub async fn run(config: Arc<Config>, paths: Vec<String>, scroll: Option<f64>) -> anyhow::Result<()> {
    let restore_wait = config.scroll.animation() + config.scroll.frame() * 2;
    let save_wait = config.scroll.debounce() + Duration::from_millis(10);
    let mut ctx = open_context(config, "/").await?;

    for path in paths {
        ctx.router.push(&path);
        let render = ctx.settle().await;
        tokio::time::sleep(restore_wait).await;

        let verdict = match render {
            GuardRender::Public => "public",
            GuardRender::Protected => "protected",
            GuardRender::Loading => "loading",
        };
        println!(
            "{path:<28} {verdict:<9} at {:<36} offset {:.0}",
            ctx.router.location(),
            ctx.viewport.offset()
        );

        if let Some(offset) = scroll {
            ctx.viewport.user_scroll(offset);
            ctx.scroll.on_scroll();
            tokio::time::sleep(save_wait).await;
        }
    }
    Ok(())
}
