//! Navigation-side coordination: which location is current, whether the
//! current session may see it, and where the viewport should be when it
//! opens.

pub mod guard;
pub mod route;
pub mod router;
pub mod scroll;

pub use guard::{GuardRender, GuardState, RouteGuard};
pub use route::RouteKey;
pub use router::Router;
pub use scroll::{ScrollRestorationController, Viewport};
