use std::fmt;

use serde::{Deserialize, Serialize};

use dash_domain::{Account, Chatbot, User};

/// Login form payload.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub account: Account,
}

/// The chatbot listing comes either bare or wrapped in `{"chatbots": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChatbotList {
    Bare(Vec<Chatbot>),
    Wrapped { chatbots: Vec<Chatbot> },
}

impl ChatbotList {
    pub fn into_vec(self) -> Vec<Chatbot> {
        match self {
            Self::Bare(list) | Self::Wrapped { chatbots: list } => list,
        }
    }
}
