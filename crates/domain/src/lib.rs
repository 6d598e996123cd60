//! Shared types for the dashboard client: errors, configuration, trace
//! events, the opaque records exchanged with the backend, and the
//! navigation seam every store and guard talks through.

pub mod config;
pub mod error;
pub mod navigator;
pub mod record;
pub mod trace;

pub use error::{Error, Result};
pub use navigator::Navigator;
pub use record::{Account, Chatbot, User};
