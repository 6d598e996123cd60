/// Client-side navigation sink.
///
/// Stores and guards never touch the router directly; they push a location
/// (path plus optional query) and whoever owns the history applies it.
pub trait Navigator: Send + Sync {
    fn push(&self, location: &str);
}
