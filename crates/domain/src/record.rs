//! Opaque records handed over by the backend.
//!
//! The client only cares about identity; every other field is carried
//! through untouched so a value written to storage reads back equal.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            /// Backend identity.  Accepted as `id` or `_id`, string or number.
            #[serde(alias = "_id", deserialize_with = "de_identity")]
            pub id: String,
            #[serde(flatten)]
            pub attributes: Map<String, Value>,
        }

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    attributes: Map::new(),
                }
            }

            /// Builder-style attribute setter.
            pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                self.attributes.insert(key.into(), value.into());
                self
            }

            pub fn attribute(&self, key: &str) -> Option<&Value> {
                self.attributes.get(key)
            }
        }
    };
}

opaque_record!(
    /// The signed-in person.
    User
);

opaque_record!(
    /// The billing/tenant account the user signed in under.
    Account
);

opaque_record!(
    /// A chatbot (workspace) owned by the account.
    Chatbot
);

impl Chatbot {
    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.attribute("name")
            .and_then(Value::as_str)
            .unwrap_or(&self.id)
    }
}

fn de_identity<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a non-empty string or number identity, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_fields_survive_round_trip() {
        let user = User::new("u-1")
            .with("email", "ada@example.com")
            .with("roles", serde_json::json!(["owner"]));
        let raw = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn underscore_id_is_accepted() {
        let bot: Chatbot =
            serde_json::from_str(r#"{"_id":"64f0","name":"Support bot"}"#).unwrap();
        assert_eq!(bot.id, "64f0");
        assert_eq!(bot.display_name(), "Support bot");
    }

    #[test]
    fn numeric_id_is_stringified() {
        let account: Account = serde_json::from_str(r#"{"id":42,"plan":"pro"}"#).unwrap();
        assert_eq!(account.id, "42");
        assert_eq!(account.attribute("plan"), Some(&Value::from("pro")));
    }

    #[test]
    fn missing_identity_is_rejected() {
        assert!(serde_json::from_str::<User>(r#"{"email":"x@y.z"}"#).is_err());
        assert!(serde_json::from_str::<User>(r#"{"id":""}"#).is_err());
        assert!(serde_json::from_str::<User>("null").is_err());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(Chatbot::new("bot-7").display_name(), "bot-7");
    }
}
