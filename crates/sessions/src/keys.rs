//! Durable-tier keys.  Values are JSON.

pub const USER: &str = "user";
pub const ACCOUNT: &str = "account";
pub const SELECTED_CHATBOT: &str = "selectedChatbot";
