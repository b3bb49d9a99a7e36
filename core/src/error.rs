//! Error types for the ApiOmat client.
//!
//! # Design
//! Every variant is a local failure in one phase of a request: building the
//! URL, building the request, sending it, or reading the body. The
//! underlying cause is kept as the error `source`. A non-2xx response is not
//! an error at this layer; its body is returned to the caller.

use ureq::http;

/// Phase of a request in which an [`ApiError`] occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UrlConstruction,
    RequestConstruction,
    Transport,
    BodyRead,
}

/// Errors returned by [`crate::Client`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Base URL and path did not form a valid URL.
    #[error("URL couldn't be parsed: {url}")]
    UrlConstruction {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The outbound request could not be built.
    #[error("HTTP request couldn't be constructed")]
    RequestConstruction(#[source] http::Error),

    /// No response was received: DNS, connection, TLS or timeout failure.
    #[error("error while sending the request: {method} {url}")]
    Transport {
        method: http::Method,
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// A response arrived but its body could not be read completely.
    #[error("couldn't read response body")]
    BodyRead(#[source] ureq::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::UrlConstruction { .. } => ErrorKind::UrlConstruction,
            ApiError::RequestConstruction(_) => ErrorKind::RequestConstruction,
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::BodyRead(_) => ErrorKind::BodyRead,
        }
    }
}
