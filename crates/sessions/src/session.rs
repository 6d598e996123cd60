//! Who is signed in.
//!
//! `loading` starts `true` and flips to `false` once, when hydration from
//! the durable tier finishes.  It never goes back: route guards rely on
//! "not loading" meaning "the answer is final until the user acts".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::watch;

use dash_domain::error::{Error, Result};
use dash_domain::trace::TraceEvent;
use dash_domain::{Account, Navigator, User};
use dash_storage::DurableStore;

use crate::keys;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Snapshot & view
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub account: Option<Account>,
    pub loading: bool,
}

impl SessionSnapshot {
    fn hydrating() -> Self {
        Self {
            user: None,
            account: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Read-only projection of a [`SessionStore`].  Cheap to clone; every
/// clone observes the same store.
#[derive(Debug, Clone)]
pub struct SessionView {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionView {
    pub fn snapshot(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.rx.borrow().user.clone()
    }

    pub fn account(&self) -> Option<Account> {
        self.rx.borrow().account.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// Wait for the next change.  Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Mark the current value as seen so `changed` only fires on newer ones.
    pub fn mark_seen(&mut self) -> SessionSnapshot {
        self.rx.borrow_and_update().clone()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct SessionStore {
    durable: DurableStore,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    state: watch::Sender<SessionSnapshot>,
    hydration_started: AtomicBool,
}

impl SessionStore {
    pub fn new(
        durable: DurableStore,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::hydrating());
        Self {
            durable,
            navigator,
            login_path: login_path.into(),
            state,
            hydration_started: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            rx: self.state.subscribe(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Hydrate `user` and `account` from the durable tier.
    ///
    /// Each key is decoded on its own; a corrupt entry only loses that
    /// field.  Only the first call does anything.
    pub async fn initialize(&self) {
        if self.hydration_started.swap(true, Ordering::AcqRel) {
            tracing::debug!("session hydration already ran");
            return;
        }

        // Consumers subscribe and render their loading state before the
        // stored session is applied.
        tokio::task::yield_now().await;

        let mut malformed = Vec::new();
        let user = read_field::<User>(&self.durable, keys::USER, &mut malformed);
        let account = read_field::<Account>(&self.durable, keys::ACCOUNT, &mut malformed);

        TraceEvent::SessionHydrated {
            has_user: user.is_some(),
            has_account: account.is_some(),
            malformed_keys: malformed,
        }
        .emit();

        self.state.send_modify(|s| {
            s.user = user;
            s.account = account;
            s.loading = false;
        });
    }

    /// Record a successful sign-in.  The caller validated the records and
    /// decides where to navigate next.
    ///
    /// Both records persist or neither does.  On a write failure the keys
    /// already written are put back as they were, memory is left alone, and
    /// the write error is returned.
    pub fn login(&self, user: User, account: Account) -> Result<()> {
        let previous = [
            (keys::USER, self.durable.get(keys::USER)),
            (keys::ACCOUNT, self.durable.get(keys::ACCOUNT)),
        ];

        let written = self
            .durable
            .write_json(keys::USER, &user)
            .and_then(|()| self.durable.write_json(keys::ACCOUNT, &account));
        if let Err(e) = written {
            tracing::warn!(error = %e, "sign-in not persisted, restoring stored session");
            for (key, value) in &previous {
                let restored = match value {
                    Some(raw) => self.durable.set(key, raw),
                    None => self.durable.remove(key),
                };
                if let Err(restore_err) = restored {
                    tracing::warn!(key, error = %restore_err, "failed to restore session key");
                }
            }
            return Err(e);
        }

        TraceEvent::SessionLoggedIn {
            user_id: user.id.clone(),
            account_id: account.id.clone(),
        }
        .emit();

        self.state.send_modify(|s| {
            s.user = Some(user);
            s.account = Some(account);
        });
        Ok(())
    }

    /// Forget the session everywhere and go to the login page.
    ///
    /// Every removal is attempted and the navigation always happens; the
    /// first storage error, if any, is returned afterwards.
    pub fn logout(&self) -> Result<()> {
        self.state.send_modify(|s| {
            s.user = None;
            s.account = None;
        });

        // `selectedChatbot` belongs to WorkspaceSelectionStore.  Removing it
        // here is the one sanctioned cross-store write: a workspace picked
        // under this account must not resurface after the next sign-in.
        let removable = [keys::USER, keys::ACCOUNT, keys::SELECTED_CHATBOT];
        let mut first_err: Option<Error> = None;
        for key in removable {
            if let Err(e) = self.durable.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove session key");
                first_err.get_or_insert(e);
            }
        }

        TraceEvent::SessionLoggedOut {
            keys_removed: removable.iter().map(|k| (*k).to_owned()).collect(),
        }
        .emit();

        self.navigator.push(&self.login_path);

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Decode one durable key, recording it in `malformed` when it is corrupt.
pub(crate) fn read_field<T: DeserializeOwned>(
    durable: &DurableStore,
    key: &str,
    malformed: &mut Vec<String>,
) -> Option<T> {
    match durable.read_json(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable stored value");
            malformed.push(key.to_owned());
            None
        }
    }
}
