//! Headless host for the dashboard's session and navigation coordinator.
//!
//! [`bootstrap::boot`] assembles the stores, guard and scroll controller the
//! way a page load does; [`login::LoginFlow`] drives sign-in and workspace
//! selection against a [`api::DashboardApi`]; the `dashctl` binary exposes
//! both on the command line.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod login;
pub mod state;
pub mod viewport;

pub use state::AppContext;
