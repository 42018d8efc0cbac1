use std::fmt;

use thiserror::Error;

/// The hostname/port pair did not form a parseable base URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid host {url:?}: {source}")]
pub struct InvalidHostError {
    /// The URL string that failed to parse.
    pub url: String,
    #[source]
    pub source: url::ParseError,
}

impl InvalidHostError {
    /// Wrap the rejected URL string and the reason it was rejected.
    pub fn new(url: impl Into<String>, source: url::ParseError) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}

/// A request argument was rejected before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
    pub field: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "{}: {}", field, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Building the underlying HTTP connection pool failed (TLS backend, resolver).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    #[source]
    pub source: Option<reqwest::Error>,
}

/// Convenience alias for fallible SDK results.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type surfaced by the SDK.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidHost(#[from] InvalidHostError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True when the host/port pair was rejected; the client must not be used.
    pub fn is_invalid_host(&self) -> bool {
        matches!(self, Error::InvalidHost(_))
    }
}
