//! Route-access guard.
//!
//! The guard sits in front of every protected location and answers one
//! question per evaluation: render the page, render a neutral loading
//! state, or send the visitor to the login page.  It must never redirect
//! while the session is still hydrating; a slow hydration would otherwise
//! bounce a signed-in user to the login page.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use url::form_urlencoded;

use dash_domain::config::RoutesConfig;
use dash_domain::trace::TraceEvent;
use dash_domain::Navigator;
use dash_sessions::{SessionSnapshot, SessionView};

use crate::route::RouteKey;
use crate::router::Router;

/// Where the session stands, as far as access is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Hydration has not finished.
    Pending,
    /// Hydrated, nobody signed in.
    Denied,
    /// Hydrated, a user is present.
    Allowed,
}

impl GuardState {
    pub fn from_session(snapshot: &SessionSnapshot) -> Self {
        if snapshot.loading {
            Self::Pending
        } else if snapshot.user.is_some() {
            Self::Allowed
        } else {
            Self::Denied
        }
    }
}

/// What the host should draw for the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRender {
    /// Not a protected location; render it whatever the session.
    Public,
    /// Neutral placeholder.  Used while pending and while a redirect to
    /// the login page is in flight, so protected content never flashes.
    Loading,
    /// Render the protected subtree.
    Protected,
}

pub struct RouteGuard {
    session: SessionView,
    navigator: Arc<dyn Navigator>,
    routes: RoutesConfig,
    /// Location the last redirect was issued for.  Cleared whenever an
    /// evaluation does not deny, so each denied episode redirects once.
    redirected_from: Mutex<Option<String>>,
}

impl RouteGuard {
    pub fn new(session: SessionView, navigator: Arc<dyn Navigator>, routes: RoutesConfig) -> Self {
        Self {
            session,
            navigator,
            routes,
            redirected_from: Mutex::new(None),
        }
    }

    pub fn state(&self) -> GuardState {
        GuardState::from_session(&self.session.snapshot())
    }

    /// Evaluate access to `location` against the current session and
    /// perform the redirect when denied.
    pub fn evaluate(&self, location: &str) -> GuardRender {
        let key = RouteKey::from_location(location);
        if self.routes.is_public(key.as_str()) {
            self.redirected_from.lock().take();
            return GuardRender::Public;
        }

        match self.state() {
            GuardState::Pending => {
                self.redirected_from.lock().take();
                GuardRender::Loading
            }
            GuardState::Allowed => {
                self.redirected_from.lock().take();
                GuardRender::Protected
            }
            GuardState::Denied => {
                let first_for_location = {
                    let mut last = self.redirected_from.lock();
                    if last.as_deref() == Some(location) {
                        false
                    } else {
                        *last = Some(location.to_owned());
                        true
                    }
                };
                if first_for_location {
                    let target = self.login_redirect(location);
                    TraceEvent::GuardRedirect {
                        from: location.to_owned(),
                        to: target.clone(),
                    }
                    .emit();
                    self.navigator.push(&target);
                }
                GuardRender::Loading
            }
        }
    }

    /// `<login_path>?<callback_param>=<location>`, form-encoded.
    pub fn login_redirect(&self, location: &str) -> String {
        let param: String = form_urlencoded::byte_serialize(self.routes.callback_param.as_bytes())
            .collect();
        let value: String = form_urlencoded::byte_serialize(location.as_bytes()).collect();
        format!("{}?{param}={value}", self.routes.login_path)
    }

    /// Re-evaluate on every session or location change and publish the
    /// latest render.  The task stops when the session store, the router,
    /// or every render subscriber goes away.
    pub fn watch(self: Arc<Self>, router: &Router) -> (watch::Receiver<GuardRender>, JoinHandle<()>) {
        let mut session = self.session.clone();
        session.mark_seen();
        let mut location = router.subscribe();
        let current = location.borrow_and_update().clone();
        let initial = self.evaluate(&current);
        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    alive = session.changed() => {
                        if !alive {
                            break;
                        }
                    }
                    changed = location.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
                session.mark_seen();
                let current = location.borrow_and_update().clone();
                let render = self.evaluate(&current);
                tx.send_if_modified(|last| {
                    if *last == render {
                        return false;
                    }
                    *last = render;
                    true
                });
                if tx.is_closed() {
                    break;
                }
            }
        });

        (rx, handle)
    }
}
