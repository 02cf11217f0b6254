//! Error types for the chat client.

use thiserror::Error;

/// Client error type.
///
/// Every variant is contained to the user action that produced it; none of
/// them tears down the controller.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response arrived, or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder if it could not be read.
        message: String,
    },

    /// Reading or writing a local store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the server was reached and reported a failure status.
    ///
    /// Everything else counts as a transport failure from the user's point of view.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
