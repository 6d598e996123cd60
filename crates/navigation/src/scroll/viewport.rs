/// The scrollable surface the controller drives.
///
/// Hosts wire the real window or scroll container here and forward its
/// scroll events to [`ScrollRestorationController::on_scroll`].
///
/// [`ScrollRestorationController::on_scroll`]: super::ScrollRestorationController::on_scroll
pub trait Viewport: Send + Sync {
    /// Current vertical offset in pixels.
    fn offset(&self) -> f64;

    /// Jump to `offset` immediately (no smooth scrolling).
    fn scroll_to(&self, offset: f64);
}
