//! Boot sequence shared by every CLI command and by tests.
//!
//! Order matters in one place only: the session-scoped tier is wiped before
//! anything can read it.  [`TransientStateReset::run`] is the only source of
//! an [`EphemeralStore`](dash_storage::EphemeralStore), so that order is
//! fixed by construction rather than by the call sequence below.

use std::sync::Arc;

use anyhow::Context;

use dash_domain::config::{Config, ConfigSeverity, StorageConfig};
use dash_navigation::{RouteGuard, Router, ScrollRestorationController};
use dash_sessions::{SessionStore, WorkspaceSelectionStore};
use dash_storage::{DurableStore, FileKeyStore, KeyStore, MemoryKeyStore, TransientStateReset};

use crate::state::AppContext;
use crate::viewport::HeadlessViewport;

/// Open the physical stores named by the storage config.  The ephemeral
/// tier is in-memory unless a file is configured.
pub fn open_storage(cfg: &StorageConfig) -> anyhow::Result<(Arc<dyn KeyStore>, Arc<dyn KeyStore>)> {
    let durable_path = cfg.durable_file();
    let durable: Arc<dyn KeyStore> = Arc::new(
        FileKeyStore::open(&durable_path)
            .with_context(|| format!("opening durable store {}", durable_path.display()))?,
    );

    let ephemeral: Arc<dyn KeyStore> = match &cfg.ephemeral_path {
        Some(path) => Arc::new(
            FileKeyStore::open(path)
                .with_context(|| format!("opening session store {}", path.display()))?,
        ),
        None => Arc::new(MemoryKeyStore::new()),
    };

    Ok((durable, ephemeral))
}

/// Boot against the process-wide reset.
pub async fn boot(
    config: Arc<Config>,
    durable_raw: Arc<dyn KeyStore>,
    ephemeral_raw: Arc<dyn KeyStore>,
    initial_location: &str,
) -> anyhow::Result<AppContext> {
    boot_with(
        TransientStateReset::process(),
        config,
        durable_raw,
        ephemeral_raw,
        initial_location,
    )
    .await
}

/// Validate config, wipe stale session-scoped state, hydrate, and wire the
/// observers.  Returns once both stores have hydrated.
pub async fn boot_with(
    reset: &TransientStateReset,
    config: Arc<Config>,
    durable_raw: Arc<dyn KeyStore>,
    ephemeral_raw: Arc<dyn KeyStore>,
    initial_location: &str,
) -> anyhow::Result<AppContext> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("config validation failed with {errors} error(s)");
    }

    // ── Transient state reset ────────────────────────────────────────
    let (ephemeral, outcome) = reset
        .run(ephemeral_raw)
        .context("clearing session-scoped state")?;

    // ── Stores ───────────────────────────────────────────────────────
    let durable = DurableStore::new(durable_raw);
    let router = Arc::new(Router::new(initial_location));
    let session = Arc::new(SessionStore::new(
        durable.clone(),
        router.clone(),
        config.routes.login_path.clone(),
    ));
    let workspace = Arc::new(WorkspaceSelectionStore::new(durable.clone()));

    // ── Observers (subscribed before hydration so they see it) ───────
    let mut tasks = vec![workspace.follow_session(session.view())];

    let guard = Arc::new(RouteGuard::new(
        session.view(),
        router.clone(),
        config.routes.clone(),
    ));
    let (render, guard_task) = guard.clone().watch(&router);
    tasks.push(guard_task);

    let viewport = Arc::new(HeadlessViewport::new());
    let scroll = Arc::new(ScrollRestorationController::new(
        ephemeral,
        viewport.clone(),
        config.scroll.clone(),
    ));
    tasks.push(scroll.clone().follow(&router));

    // ── Hydration ────────────────────────────────────────────────────
    tokio::join!(session.initialize(), workspace.initialize());
    tracing::debug!(location = %router.location(), "dashboard client booted");

    Ok(AppContext {
        config,
        durable,
        reset: outcome,
        session,
        workspace,
        router,
        guard,
        render,
        scroll,
        viewport,
        tasks,
    })
}
