use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use dash_domain::config::Config;
use dash_navigation::{GuardRender, RouteGuard, Router, ScrollRestorationController};
use dash_sessions::{SessionStore, WorkspaceSelectionStore};
use dash_storage::{DurableStore, ResetOutcome};

use crate::viewport::HeadlessViewport;

/// Everything a booted dashboard client holds.
///
/// Fields are grouped by concern:
/// - **Storage**: the durable tier and what the boot reset did
/// - **Session**: who is signed in and which workspace is active
/// - **Navigation**: location, access guard, scroll restoration
pub struct AppContext {
    pub config: Arc<Config>,

    // ── Storage ───────────────────────────────────────────────────────
    pub durable: DurableStore,
    pub reset: ResetOutcome,

    // ── Session ───────────────────────────────────────────────────────
    pub session: Arc<SessionStore>,
    pub workspace: Arc<WorkspaceSelectionStore>,

    // ── Navigation ────────────────────────────────────────────────────
    pub router: Arc<Router>,
    pub guard: Arc<RouteGuard>,
    pub render: watch::Receiver<GuardRender>,
    pub scroll: Arc<ScrollRestorationController>,
    pub viewport: Arc<HeadlessViewport>,

    pub(crate) tasks: Vec<JoinHandle<()>>,
}

impl AppContext {
    /// Latest guard decision for the current location.
    pub fn current_render(&self) -> GuardRender {
        *self.render.borrow()
    }

    /// Let the observers catch up with the last store or location change,
    /// then return the guard decision.  Needs the tasks to share this
    /// thread's scheduler, as on a current-thread runtime.
    pub async fn settle(&mut self) -> GuardRender {
        for _ in 0..SETTLE_ROUNDS {
            let location = self.router.location();
            tokio::task::yield_now().await;
            let quiet = self.router.location() == location
                && !self.render.has_changed().unwrap_or(false);
            if quiet {
                break;
            }
            self.render.borrow_and_update();
        }
        *self.render.borrow_and_update()
    }
}

const SETTLE_ROUNDS: usize = 32;

impl Drop for AppContext {
    /// Tear down: unmount the route (cancelling any animation or pending
    /// write) and stop the observers.
    fn drop(&mut self) {
        self.scroll.leave();
        for task in &self.tasks {
            task.abort();
        }
    }
}
