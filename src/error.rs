//! Error types surfaced by every API operation.

use std::fmt;
use std::num::ParseIntError;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codes;
use crate::templates::TemplateValidationResponse;
use crate::transport::HttpError;

/// An application-level error reported by the provider.
///
/// Decoded from `{"ErrorCode": .., "Message": ..}` bodies. The HTTP status
/// travels out-of-band and is never part of the wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiError {
    /// Provider error code; zero means success.
    #[serde(default)]
    pub error_code: i64,
    /// Human-readable message from the provider.
    #[serde(default)]
    pub message: String,
    /// HTTP status of the response that carried the error.
    #[serde(skip, default = "default_status")]
    pub status: StatusCode,
}

const fn default_status() -> StatusCode {
    StatusCode::OK
}

impl ApiError {
    /// Creates an error with the given code and status, using the code's
    /// documented meaning as the message.
    #[must_use]
    pub fn from_code(error_code: i64, status: StatusCode) -> Self {
        Self {
            error_code,
            message: codes::meaning(error_code).to_string(),
            status,
        }
    }

    /// Returns whether the code signals a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error_code != 0
    }

    /// Documented meaning of the error code, or `"unknown"`.
    #[must_use]
    pub fn meaning(&self) -> &'static str {
        codes::meaning(self.error_code)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "postmark error {} {}: {}",
            self.error_code,
            self.message,
            self.meaning()
        )
    }
}

impl std::error::Error for ApiError {}

/// Error type for API operations.
///
/// Local failures (encoding, URL building, dispatch, decoding) are kept
/// apart from failures the provider reported, so callers can branch on
/// [`Error::Api`] without string matching.
#[derive(Debug, Error)]
pub enum Error {
    /// The provider rejected the call with a non-zero error code.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A non-2xx response whose body was not JSON.
    #[error("postmark call errored with status {status}: {body}")]
    UnexpectedResponse {
        /// HTTP status of the response
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// A non-2xx response that carried no provider error code.
    #[error("postmark call errored with status: {0}")]
    Status(StatusCode),

    /// The HTTP round-trip itself failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Payload encoding or response decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// A credential could not be encoded as a header value.
    #[error("Invalid value for header {name}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
    },

    /// The operation's cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,

    /// A template identifier was not a base-10 integer.
    #[error("Invalid template id '{value}': {source}")]
    InvalidTemplateId {
        /// The rejected identifier
        value: String,
        /// Underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Template validation was requested from the in-memory fake.
    ///
    /// Carries the explanatory response the fake produced.
    #[error("Template validation is not supported by the in-memory fake")]
    ValidationUnsupported(Box<TemplateValidationResponse>),
}

impl Error {
    /// HTTP status associated with the failure, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::UnexpectedResponse { status, .. } | Self::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// Provider error code, if the provider reported one.
    #[must_use]
    pub const fn error_code(&self) -> Option<i64> {
        match self {
            Self::Api(e) => Some(e.error_code),
            _ => None,
        }
    }

    /// Returns true if the failure was caused by cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
