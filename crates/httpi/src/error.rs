//! Transport error types

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur during an exchange.
///
/// Errors produced by user-supplied validators and producers travel through
/// the [`Interceptor`](crate::Interceptor) untouched, so whatever variant a
/// test returns is exactly what the caller observes.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout error
    #[error("Timeout")]
    Timeout,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request URL could not be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as given
        url: String,
        /// Parser message
        reason: String,
    },

    /// Request rejected before it was sent
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Arbitrary caller-defined error, recoverable with [`TransportError::downcast_ref`]
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Generic transport error
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Wrap a caller-defined error so that it can be returned from a
    /// validator or producer and recovered on the other side.
    pub fn custom<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Custom(Box::new(err))
    }

    /// Downcast a [`TransportError::Custom`] back to the caller's error type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Custom(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
