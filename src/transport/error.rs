//! Error types for the HTTP transport.

use thiserror::Error;

/// Failure to complete an HTTP round-trip.
///
/// Raised by [`HttpClient`](super::HttpClient) implementations before any
/// response status is known. The API engine surfaces these unchanged.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// Covers DNS resolution failures, refused connections, TLS errors
    /// and bodies that could not be read to the end.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The client's configured timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
