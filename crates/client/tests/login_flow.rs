//! Sign-in and workspace selection through a booted client.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use dash_client::api::{Credentials, DashboardApi};
use dash_client::bootstrap::boot_with;
use dash_client::login::LoginFlow;
use dash_client::AppContext;
use dash_domain::config::Config;
use dash_domain::error::{Error, Result};
use dash_domain::{Account, Chatbot, User};
use dash_navigation::GuardRender;
use dash_storage::{KeyStore, MemoryKeyStore, TransientStateReset};

// ── Test double ─────────────────────────────────────────────────────────

#[derive(Default)]
struct MockApi {
    list_calls: Mutex<Vec<String>>,
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(User, Account)> {
        if credentials.password != "correct horse" {
            return Err(Error::Auth("invalid credentials".into()));
        }
        Ok((
            User::new("u-1").with("email", credentials.email.clone()),
            Account::new("a-1"),
        ))
    }

    async fn list_chatbots(&self, account: &Account) -> Result<Vec<Chatbot>> {
        self.list_calls.lock().push(account.id.clone());
        Ok(vec![
            Chatbot::new("bot-1").with("name", "Support"),
            Chatbot::new("bot-2").with("name", "Sales"),
        ])
    }
}

async fn boot_at(raw: Arc<MemoryKeyStore>, location: &str) -> AppContext {
    let mut ctx = boot_with(
        &TransientStateReset::new(),
        Arc::new(Config::default()),
        raw,
        Arc::new(MemoryKeyStore::new()),
        location,
    )
    .await
    .unwrap();
    ctx.settle().await;
    ctx
}

fn good() -> Credentials {
    Credentials::new("ada@example.com", "correct horse")
}

// ── Sign-in ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn sign_in_follows_the_callback_from_the_login_page() {
    let raw = Arc::new(MemoryKeyStore::new());
    let mut ctx = boot_at(raw.clone(), "/login?callbackUrl=%2Fchat-history%3Fpage%3D2").await;
    let flow = LoginFlow::new(Arc::new(MockApi::default()), &ctx);

    let target = flow.sign_in(&good(), None).await.unwrap();

    assert_eq!(target, "/chat-history?page=2");
    assert_eq!(ctx.router.location(), "/chat-history?page=2");
    assert_eq!(ctx.settle().await, GuardRender::Protected);
    assert!(raw.get("user").unwrap().contains("ada@example.com"));
    assert!(raw.get("account").is_some());
}

#[tokio::test]
async fn unsafe_callbacks_fall_back_to_the_landing_page() {
    for callback in ["https://evil.example/", "//evil.example", "/login", "settings"] {
        let ctx = boot_at(Arc::new(MemoryKeyStore::new()), "/login").await;
        let flow = LoginFlow::new(Arc::new(MockApi::default()), &ctx);

        let target = flow.sign_in(&good(), Some(callback)).await.unwrap();
        assert_eq!(target, "/dashboard", "callback {callback:?}");
    }
}

#[tokio::test]
async fn explicit_callback_wins_over_the_location() {
    let ctx = boot_at(Arc::new(MemoryKeyStore::new()), "/login?callbackUrl=%2Fsettings").await;
    let flow = LoginFlow::new(Arc::new(MockApi::default()), &ctx);

    let target = flow.sign_in(&good(), Some("/billing")).await.unwrap();
    assert_eq!(target, "/billing");
}

#[tokio::test]
async fn refused_credentials_leave_no_session() {
    let raw = Arc::new(MemoryKeyStore::new());
    let ctx = boot_at(raw.clone(), "/login").await;
    let flow = LoginFlow::new(Arc::new(MockApi::default()), &ctx);

    let err = flow
        .sign_in(&Credentials::new("ada@example.com", "nope"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
    assert!(!ctx.session.snapshot().is_authenticated());
    assert!(raw.get("user").is_none());
    assert_eq!(ctx.router.location(), "/login");
}

// ── Workspace selection ─────────────────────────────────────────────────

#[tokio::test]
async fn choosing_a_chatbot_persists_it() {
    let raw = Arc::new(MemoryKeyStore::new());
    let ctx = boot_at(raw.clone(), "/login").await;
    let api = Arc::new(MockApi::default());
    let flow = LoginFlow::new(api.clone(), &ctx);
    flow.sign_in(&good(), None).await.unwrap();

    let bot = flow.choose_chatbot("bot-2").await.unwrap();

    assert_eq!(bot.display_name(), "Sales");
    assert_eq!(ctx.workspace.snapshot().selected_chatbot.unwrap().id, "bot-2");
    assert!(raw.get("selectedChatbot").unwrap().contains("bot-2"));
    assert_eq!(*api.list_calls.lock(), vec!["a-1".to_string()]);
}

#[tokio::test]
async fn unknown_chatbot_is_not_found() {
    let ctx = boot_at(Arc::new(MemoryKeyStore::new()), "/login").await;
    let flow = LoginFlow::new(Arc::new(MockApi::default()), &ctx);
    flow.sign_in(&good(), None).await.unwrap();

    let err = flow.choose_chatbot("bot-404").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(ctx.workspace.snapshot().selected_chatbot.is_none());
}

#[tokio::test]
async fn choosing_without_a_session_is_rejected() {
    let api = Arc::new(MockApi::default());
    let ctx = boot_at(Arc::new(MemoryKeyStore::new()), "/").await;
    let flow = LoginFlow::new(api.clone(), &ctx);

    let err = flow.choose_chatbot("bot-1").await.unwrap_err();
    assert!(matches!(err, Error::MissingIdentity(_)));
    assert!(api.list_calls.lock().is_empty());
}

#[tokio::test]
async fn logout_drops_the_workspace_and_returns_to_login() {
    let raw = Arc::new(MemoryKeyStore::new());
    let mut ctx = boot_at(raw.clone(), "/login").await;
    let flow = LoginFlow::new(Arc::new(MockApi::default()), &ctx);
    flow.sign_in(&good(), None).await.unwrap();
    flow.choose_chatbot("bot-1").await.unwrap();
    assert_eq!(ctx.settle().await, GuardRender::Protected);

    ctx.session.logout().unwrap();
    let render = ctx.settle().await;

    assert_eq!(ctx.router.location(), "/login");
    assert_eq!(render, GuardRender::Public);
    assert!(ctx.workspace.snapshot().selected_chatbot.is_none());
    for key in ["user", "account", "selectedChatbot"] {
        assert!(raw.get(key).is_none(), "{key} survived logout");
    }
}
