//! Viewport for hosts without a real scroll surface.

use parking_lot::Mutex;

use dash_navigation::Viewport;

/// Remembers the offset it was last moved to.  The CLI drives it to show
/// what a browser window would do.
#[derive(Debug, Default)]
pub struct HeadlessViewport {
    offset: Mutex<f64>,
}

impl HeadlessViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user scrolling the page.
    pub fn user_scroll(&self, offset: f64) {
        *self.offset.lock() = offset.max(0.0);
    }
}

impl Viewport for HeadlessViewport {
    fn offset(&self) -> f64 {
        *self.offset.lock()
    }

    fn scroll_to(&self, offset: f64) {
        *self.offset.lock() = offset;
    }
}
