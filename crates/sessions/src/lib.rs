//! Client session state for the dashboard.
//!
//! Two independent stores hydrate from the durable tier at boot: who is
//! signed in ([`SessionStore`]) and which chatbot workspace is active
//! ([`WorkspaceSelectionStore`]).  Each owns its state behind a narrow
//! mutation API and hands consumers a read-only view backed by a
//! `tokio::sync::watch` channel.

pub mod keys;
pub mod session;
pub mod workspace;

pub use session::{SessionSnapshot, SessionStore, SessionView};
pub use workspace::{WorkspaceSelectionStore, WorkspaceSnapshot, WorkspaceView};
