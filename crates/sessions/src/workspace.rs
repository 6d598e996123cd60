//! Which chatbot workspace is active.
//!
//! A purely local cache: the selection page fetches chatbots and calls
//! [`WorkspaceSelectionStore::select_chatbot`]; this store only remembers
//! the choice across reloads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use dash_domain::error::Result;
use dash_domain::trace::TraceEvent;
use dash_domain::Chatbot;
use dash_storage::DurableStore;

use crate::keys;
use crate::session::{read_field, SessionView};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceSnapshot {
    pub selected_chatbot: Option<Chatbot>,
    pub loading: bool,
}

/// Read-only projection of a [`WorkspaceSelectionStore`].
#[derive(Debug, Clone)]
pub struct WorkspaceView {
    rx: watch::Receiver<WorkspaceSnapshot>,
}

impl WorkspaceView {
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        self.rx.borrow().clone()
    }

    pub fn selected_chatbot(&self) -> Option<Chatbot> {
        self.rx.borrow().selected_chatbot.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().loading
    }

    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

pub struct WorkspaceSelectionStore {
    durable: DurableStore,
    state: watch::Sender<WorkspaceSnapshot>,
    hydration_started: AtomicBool,
}

impl WorkspaceSelectionStore {
    pub fn new(durable: DurableStore) -> Self {
        let (state, _) = watch::channel(WorkspaceSnapshot {
            selected_chatbot: None,
            loading: true,
        });
        Self {
            durable,
            state,
            hydration_started: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> WorkspaceView {
        WorkspaceView {
            rx: self.state.subscribe(),
        }
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        self.state.borrow().clone()
    }

    /// Hydrate `selectedChatbot`.  A corrupt entry is logged and ignored.
    pub async fn initialize(&self) {
        if self.hydration_started.swap(true, Ordering::AcqRel) {
            tracing::debug!("workspace hydration already ran");
            return;
        }

        tokio::task::yield_now().await;

        let mut malformed = Vec::new();
        let selected =
            read_field::<Chatbot>(&self.durable, keys::SELECTED_CHATBOT, &mut malformed);

        TraceEvent::WorkspaceHydrated {
            chatbot_id: selected.as_ref().map(|c| c.id.clone()),
        }
        .emit();

        self.state.send_modify(|s| {
            s.selected_chatbot = selected;
            s.loading = false;
        });
    }

    /// Make `chatbot` the active workspace, or clear the selection.
    pub fn select_chatbot(&self, chatbot: Option<Chatbot>) -> Result<()> {
        TraceEvent::WorkspaceSelected {
            chatbot_id: chatbot.as_ref().map(|c| c.id.clone()),
        }
        .emit();

        let persisted = match &chatbot {
            Some(bot) => self.durable.write_json(keys::SELECTED_CHATBOT, bot),
            None => self.durable.remove(keys::SELECTED_CHATBOT),
        };

        self.state.send_modify(|s| s.selected_chatbot = chatbot);
        persisted
    }

    /// Drop the in-memory selection whenever the session is observed
    /// signed out after hydration.
    ///
    /// Checking the observed state rather than a signed-in to signed-out
    /// edge means a sign-in and sign-out coalesced into one watch update
    /// still clears it.  The durable key is left alone;
    /// `SessionStore::logout` already removed it.  The task ends when either
    /// store goes away.
    pub fn follow_session(self: &Arc<Self>, mut session: SessionView) -> JoinHandle<()> {
        let store = Arc::downgrade(self);

        tokio::spawn(async move {
            while session.changed().await {
                let snap = session.mark_seen();
                if snap.loading || snap.is_authenticated() {
                    continue;
                }
                let Some(store) = store.upgrade() else {
                    break;
                };
                let dropped = store
                    .state
                    .send_if_modified(|s| s.selected_chatbot.take().is_some());
                if dropped {
                    tracing::debug!("session ended, workspace selection dropped");
                }
            }
        })
    }
}
