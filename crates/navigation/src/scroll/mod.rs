//! Per-route scroll restoration.
//!
//! On every route entry the viewport snaps to the top, then, when the
//! session-scoped cache remembers an offset for that route, eases back to
//! it.  While the route is active, scroll events are debounced into a single
//! cache write per quiet period.
//!
//! The controller owns at most one running animation and one pending write,
//! each behind a [`CancellationToken`] held by the mounted route.  Dropping
//! the route cancels both, and leaving, entering another route, and dropping
//! the controller all drop it; no exit path can leave a tween or timer
//! running for a route the user left.

mod easing;
mod viewport;

pub use easing::{ease_out_cubic, tween};
pub use viewport::Viewport;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use dash_domain::config::ScrollConfig;
use dash_domain::trace::TraceEvent;
use dash_storage::EphemeralStore;

use crate::route::RouteKey;
use crate::router::Router;

/// The route currently mounted and the work running on its behalf.
struct ActiveRoute {
    key: RouteKey,
    storage_key: String,
    animation: Option<CancellationToken>,
    debounce: Option<CancellationToken>,
}

impl Drop for ActiveRoute {
    fn drop(&mut self) {
        if let Some(animation) = &self.animation {
            animation.cancel();
        }
        if let Some(debounce) = &self.debounce {
            debounce.cancel();
        }
    }
}

pub struct ScrollRestorationController {
    store: EphemeralStore,
    viewport: Arc<dyn Viewport>,
    config: ScrollConfig,
    active: Mutex<Option<ActiveRoute>>,
}

impl ScrollRestorationController {
    pub fn new(store: EphemeralStore, viewport: Arc<dyn Viewport>, config: ScrollConfig) -> Self {
        Self {
            store,
            viewport,
            config,
            active: Mutex::new(None),
        }
    }

    /// Cache key for a route, e.g. `scrollPos:/dashboard`.
    pub fn storage_key(&self, key: &RouteKey) -> String {
        format!("{}{}", self.config.key_prefix, key)
    }

    /// The offset remembered for `key`, if it is a usable number.
    pub fn cached_offset(&self, key: &RouteKey) -> Option<u64> {
        let raw = self.store.get(&self.storage_key(key))?;
        parse_offset(&raw)
    }

    pub fn active_route(&self) -> Option<RouteKey> {
        self.active.lock().as_ref().map(|r| r.key.clone())
    }

    /// Mount `key`.  Must run inside a tokio runtime.
    ///
    /// Whatever the previous route had running is cancelled first.
    pub fn enter(&self, key: RouteKey) {
        let mut active = self.active.lock();
        active.take();

        self.viewport.scroll_to(0.0);

        let storage_key = self.storage_key(&key);
        let animation = match self.store.get(&storage_key) {
            Some(raw) => match parse_offset(&raw) {
                Some(target) if target > 0 => Some(self.spawn_animation(key.clone(), target)),
                Some(_) => None,
                None => {
                    tracing::debug!(route = %key, raw = %raw, "ignoring unusable cached scroll offset");
                    None
                }
            },
            None => None,
        };

        *active = Some(ActiveRoute {
            key,
            storage_key,
            animation,
            debounce: None,
        });
    }

    /// Unmount the current route.  A pending write is discarded, not
    /// flushed.
    pub fn leave(&self) {
        self.active.lock().take();
    }

    /// Passive scroll listener.  Restarts the quiet-period timer; only the
    /// last event of a burst produces a write.
    pub fn on_scroll(&self) {
        let mut active = self.active.lock();
        let Some(route) = active.as_mut() else {
            return;
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let store = self.store.clone();
        let viewport = self.viewport.clone();
        let storage_key = route.storage_key.clone();
        let route_key = route.key.clone();
        let quiet = self.config.debounce();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => return,
                _ = tokio::time::sleep(quiet) => {}
            }

            let offset = viewport.offset().max(0.0).round() as u64;
            if cancelled.is_cancelled() {
                return;
            }
            if let Err(e) = store.set(&storage_key, &offset.to_string()) {
                tracing::warn!(route = %route_key, error = %e, "failed to save scroll position");
                return;
            }
            TraceEvent::ScrollPositionSaved {
                route_key: route_key.to_string(),
                offset,
            }
            .emit();
        });

        if let Some(previous) = route.debounce.replace(token) {
            previous.cancel();
        }
    }

    /// Follow the router: enter on every route-key change, leave when the
    /// router goes away.  Query-only changes keep the current route mounted.
    pub fn follow(self: Arc<Self>, router: &Router) -> JoinHandle<()> {
        let mut location = router.subscribe();
        let mut current = RouteKey::from_location(&location.borrow_and_update());
        self.enter(current.clone());

        tokio::spawn(async move {
            while location.changed().await.is_ok() {
                let key = RouteKey::from_location(&location.borrow_and_update());
                if key != current {
                    current = key.clone();
                    self.enter(key);
                }
            }
            self.leave();
        })
    }

    fn spawn_animation(&self, key: RouteKey, target: u64) -> CancellationToken {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let viewport = self.viewport.clone();
        let duration = self.config.animation();
        let frame = self.config.frame();

        tokio::spawn(async move {
            let from = viewport.offset();
            let to = target as f64;
            let start = Instant::now();
            let mut ticker = tokio::time::interval(frame);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => {
                        tracing::debug!(route = %key, "scroll restoration cancelled");
                        return;
                    }
                    _ = ticker.tick() => {}
                }

                let progress = if duration.is_zero() {
                    1.0
                } else {
                    (start.elapsed().as_secs_f64() / duration.as_secs_f64()).min(1.0)
                };
                if cancelled.is_cancelled() {
                    return;
                }
                viewport.scroll_to(tween(from, to, progress));

                if progress >= 1.0 {
                    TraceEvent::ScrollRestored {
                        route_key: key.to_string(),
                        target,
                        duration_ms: duration.as_millis() as u64,
                    }
                    .emit();
                    return;
                }
            }
        });

        token
    }
}

/// Accept what a scroll listener could have written: a non-negative integer,
/// or a non-negative finite decimal (truncated).
fn parse_offset(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v as u64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_offset_accepts_integers_and_decimals() {
        assert_eq!(parse_offset("400"), Some(400));
        assert_eq!(parse_offset(" 12 "), Some(12));
        assert_eq!(parse_offset("12.9"), Some(12));
        assert_eq!(parse_offset("0"), Some(0));
    }

    #[test]
    fn parse_offset_rejects_garbage() {
        assert_eq!(parse_offset(""), None);
        assert_eq!(parse_offset("-5"), None);
        assert_eq!(parse_offset("NaN"), None);
        assert_eq!(parse_offset("inf"), None);
        assert_eq!(parse_offset("top"), None);
    }
}
