use async_trait::async_trait;

use dash_domain::error::Result;
use dash_domain::{Account, Chatbot, User};

use super::types::Credentials;

/// What the dashboard needs from its backend.
///
/// Records come back opaque: only their identity is interpreted here.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Exchange credentials for the signed-in user and their account
    /// (POST /auth/login).
    async fn authenticate(&self, credentials: &Credentials) -> Result<(User, Account)>;

    /// Chatbots owned by `account` (GET /chatbots?accountId=).
    async fn list_chatbots(&self, account: &Account) -> Result<Vec<Chatbot>>;
}
