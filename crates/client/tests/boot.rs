//! Boot sequence: reset, hydration, and the first guard decision.

use std::sync::Arc;
use std::time::Duration;

use dash_client::bootstrap::{boot_with, open_storage};
use dash_domain::config::{Config, StorageConfig};
use dash_navigation::{GuardRender, Viewport};
use dash_storage::{KeyStore, MemoryKeyStore, ResetOutcome, TransientStateReset};

fn config() -> Arc<Config> {
    Arc::new(Config::default())
}

#[tokio::test(start_paused = true)]
async fn fresh_load_discards_previous_scroll_offsets() {
    let ephemeral = Arc::new(MemoryKeyStore::seeded([
        ("scrollPos:/chat-history", "120"),
        ("scrollPos:/dashboard", "400"),
    ]));
    let durable = Arc::new(MemoryKeyStore::seeded([("user", r#"{"id":"u-1"}"#)]));

    let mut ctx = boot_with(
        &TransientStateReset::new(),
        config(),
        durable,
        ephemeral.clone(),
        "/chat-history",
    )
    .await
    .unwrap();

    assert_eq!(ctx.reset, ResetOutcome::Cleared { keys_removed: 2 });
    assert!(ephemeral.is_empty());

    assert_eq!(ctx.settle().await, GuardRender::Protected);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(ctx.viewport.offset(), 0.0);
}

#[tokio::test]
async fn second_boot_in_one_lifetime_keeps_session_offsets() {
    let reset = TransientStateReset::new();
    let ephemeral = Arc::new(MemoryKeyStore::new());

    let first = boot_with(
        &reset,
        config(),
        Arc::new(MemoryKeyStore::new()),
        ephemeral.clone(),
        "/",
    )
    .await
    .unwrap();
    ephemeral.set("scrollPos:/dashboard", "250").unwrap();
    drop(first);

    let second = boot_with(
        &reset,
        config(),
        Arc::new(MemoryKeyStore::new()),
        ephemeral.clone(),
        "/",
    )
    .await
    .unwrap();
    assert_eq!(second.reset, ResetOutcome::AlreadyRan);
    assert_eq!(ephemeral.get("scrollPos:/dashboard").as_deref(), Some("250"));
}

#[tokio::test]
async fn signed_in_user_stays_on_a_protected_page() {
    let durable = Arc::new(MemoryKeyStore::seeded([
        ("user", r#"{"_id":"u-1"}"#),
        ("account", r#"{"_id":"a-1"}"#),
        ("selectedChatbot", r#"{"_id":"bot-1","name":"Support"}"#),
    ]));
    let mut ctx = boot_with(
        &TransientStateReset::new(),
        config(),
        durable,
        Arc::new(MemoryKeyStore::new()),
        "/dashboard",
    )
    .await
    .unwrap();

    assert_eq!(ctx.settle().await, GuardRender::Protected);
    assert_eq!(ctx.router.location(), "/dashboard");
    assert_eq!(
        ctx.workspace.snapshot().selected_chatbot.unwrap().display_name(),
        "Support"
    );
}

#[tokio::test]
async fn signed_out_visitor_is_sent_to_login_with_callback() {
    let mut ctx = boot_with(
        &TransientStateReset::new(),
        config(),
        Arc::new(MemoryKeyStore::new()),
        Arc::new(MemoryKeyStore::new()),
        "/chat-history?page=2",
    )
    .await
    .unwrap();

    assert_eq!(ctx.settle().await, GuardRender::Public);
    assert_eq!(
        ctx.router.location(),
        "/login?callbackUrl=%2Fchat-history%3Fpage%3D2"
    );
}

#[tokio::test]
async fn corrupt_durable_state_boots_signed_out() {
    let durable = Arc::new(MemoryKeyStore::seeded([
        ("user", "{not json"),
        ("selectedChatbot", "[]"),
    ]));
    let ctx = boot_with(
        &TransientStateReset::new(),
        config(),
        durable,
        Arc::new(MemoryKeyStore::new()),
        "/",
    )
    .await
    .unwrap();

    let session = ctx.session.snapshot();
    assert!(!session.loading);
    assert!(session.user.is_none());
    assert!(ctx.workspace.snapshot().selected_chatbot.is_none());
}

#[tokio::test]
async fn invalid_config_refuses_to_boot() {
    let mut config = Config::default();
    config.routes.login_path = "login".into();

    let result = boot_with(
        &TransientStateReset::new(),
        Arc::new(config),
        Arc::new(MemoryKeyStore::new()),
        Arc::new(MemoryKeyStore::new()),
        "/",
    )
    .await;
    assert!(result.is_err());
}

#[test]
fn file_storage_round_trips_through_state_path() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = StorageConfig {
        state_path: dir.path().join("state"),
        ephemeral_path: Some(dir.path().join("session.json")),
    };

    {
        let (durable, ephemeral) = open_storage(&cfg).unwrap();
        durable.set("user", r#"{"id":"u-1"}"#).unwrap();
        ephemeral.set("scrollPos:/", "10").unwrap();
    }

    let (durable, ephemeral) = open_storage(&cfg).unwrap();
    assert_eq!(durable.get("user").as_deref(), Some(r#"{"id":"u-1"}"#));
    assert_eq!(ephemeral.get("scrollPos:/").as_deref(), Some("10"));
    assert!(cfg.durable_file().exists());
}
