//! Boundary to the dashboard backend.
//!
//! The coordinator only needs two calls from the server: exchanging
//! credentials for a user/account pair, and listing the chatbots an account
//! owns.  [`DashboardApi`] abstracts them so the login flow can run against
//! the real REST backend or a test double.

pub mod provider;
pub mod rest;
pub mod types;

pub use provider::DashboardApi;
pub use rest::RestDashboardApi;
pub use types::{ChatbotList, Credentials, LoginResponse};
