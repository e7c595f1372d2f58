//! Error types for the JSON API client.
//!
//! # Design
//! A completed exchange can fail in exactly two ways: the server rejected it
//! (`Status`) or the body was not JSON (`Parse`). Anything the transport
//! itself reports lands in `Transport` untouched, so callers can match on the
//! original `TransportError` value. The remaining variants cover inputs that
//! are rejected before any request is built.

use thiserror::Error;

/// Errors returned by `HttpClient` and `JsonCodec`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside `200..=299`. The body is
    /// never read for these responses.
    #[error("HTTP status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be decoded as JSON.
    #[error("response body is not valid JSON: {0}")]
    Parse(String),

    /// The request payload could not be serialized to JSON.
    #[error("request body could not be serialized: {0}")]
    Serialization(String),

    /// The base URL or endpoint does not form a valid absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A query parameter value is neither a string nor a number.
    #[error("invalid query parameter: {0}")]
    InvalidQuery(String),

    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The exchange could not complete. Passed through from the transport.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// Status code carried by a `Status` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Failures reported by a `Transport` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not connect (refused, reset, DNS failure).
    #[error("connection error: {0}")]
    Connection(String),

    /// The exchange did not finish in time.
    #[error("request timeout")]
    Timeout,

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
