/// Shared error type used across all dashboard client crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted value could not be decoded.  Stores recover from this by
    /// treating the field as absent.
    #[error("malformed stored value under `{key}`: {source}")]
    MalformedStoredValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// An operation needed a session or record identity that was not there.
    #[error("missing identity: {0}")]
    MissingIdentity(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("auth: {0}")]
    Auth(String),

    #[error("config: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
