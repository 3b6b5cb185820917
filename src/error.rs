//! Error types for blitnaut-dl
//!
//! Nothing below the driver catches or classifies these errors. They propagate
//! to the caller of [`run`](crate::run), and the binary turns any of them into
//! a failure exit status.

use thiserror::Error;

/// Result type alias for blitnaut-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for blitnaut-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "images.base_url")
        key: Option<String>,
    },

    /// Transport-level failure (connect, TLS, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Http {
        /// Response status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The subgraph reported query errors or returned no data
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// I/O error (directory creation, existence checks, image writes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}
