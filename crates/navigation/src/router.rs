//! Owner of the current location.

use tokio::sync::watch;

use dash_domain::Navigator;

use crate::route::RouteKey;

/// Client-side history.  Holds the current location (path plus query) and
/// publishes every change to subscribers.
pub struct Router {
    location: watch::Sender<String>,
}

impl Router {
    pub fn new(initial: impl Into<String>) -> Self {
        let (location, _) = watch::channel(initial.into());
        Self { location }
    }

    pub fn location(&self) -> String {
        self.location.borrow().clone()
    }

    pub fn route_key(&self) -> RouteKey {
        RouteKey::from_location(&self.location.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }
}

impl Navigator for Router {
    /// Pushing the current location again is a no-op for subscribers.
    fn push(&self, location: &str) {
        let changed = self.location.send_if_modified(|current| {
            if current == location {
                return false;
            }
            *current = location.to_owned();
            true
        });
        if changed {
            tracing::debug!(location, "navigated");
        }
    }
}
