//! Error types for Temp Mail API calls.
//!
//! Every failure is surfaced verbatim to the caller; nothing is retried.
//! Non-2xx responses with a well-formed error body become [`Error::Api`],
//! which carries the decoded [`ApiError`] envelope.

use crate::response::Response;
use crate::transport::BoxError;
use http::StatusCode;
use serde::Deserialize;
use std::fmt;

/// The main error type for Temp Mail API calls.
///
/// # Examples
///
/// ```no_run
/// use tempmail::{Client, Error};
///
/// # async fn example() {
/// let client = Client::new("YOUR_API_KEY");
///
/// match client.get_message("01JE97FT950QRPDYGDXJ4R43QR").await {
///     Ok(message) => println!("Subject: {}", message.subject),
///     Err(Error::Api(err)) => {
///         eprintln!("API error: {}", err.full_message());
///     }
///     Err(Error::Decode { raw_body, source, .. }) => {
///         eprintln!("Unexpected body {raw_body:?}: {source}");
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built.
    ///
    /// Raised for an invalid base URL or composed URL, a header value that
    /// is not representable (such as an API key containing a newline), or a
    /// cancellation token that was already cancelled. Nothing was sent.
    #[error("Failed to construct request: {0}")]
    Construction(String),

    /// The request body could not be encoded as JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A network-level error occurred.
    ///
    /// Covers connection and DNS failures, transport timeouts, a body stream
    /// that failed while being read, and in-flight cancellation (the source
    /// is then [`Cancelled`](crate::transport::Cancelled)).
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// A response body (success or error) was not the expected JSON.
    #[error("Failed to decode response (status {status}): {source}")]
    Decode {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body, lossily converted to UTF-8
        raw_body: String,
        /// The serde error
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a non-2xx status and a well-formed error body.
    #[error("{0}")]
    Api(Box<ApiError>),
}

impl Error {
    /// Returns the HTTP status code if this error came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(err) => Some(err.response.status),
            Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the decoded error envelope for [`Error::Api`].
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the raw response body for [`Error::Decode`].
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Decode { raw_body, .. } => Some(raw_body),
            _ => None,
        }
    }

    /// Returns `true` if the call was stopped by the client's cancellation token.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Error::Transport(source) => source.is::<crate::transport::Cancelled>(),
            _ => false,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(Box::new(err))
    }
}

/// The error envelope returned by the API for non-2xx responses.
///
/// `Display` renders the short form (see [`ApiError::message`]); use
/// [`ApiError::full_message`] when the request id is needed too.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// The response that carried the error.
    pub response: Response,

    /// What went wrong.
    pub error: ErrorDetails,

    /// Request metadata, useful when contacting support.
    pub meta: ErrorMeta,
}

/// The `error` object of an error envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetails {
    /// Coarse category, e.g. `request_error` or `api_error`.
    #[serde(rename = "type", default)]
    pub error_type: String,

    /// Machine-readable error code, e.g. `not_found`.
    #[serde(default)]
    pub code: String,

    /// Human-readable description.
    #[serde(default)]
    pub detail: String,
}

/// The `meta` object of an error envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorMeta {
    /// Identifier of the failed request.
    #[serde(default)]
    pub request_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
    #[serde(default)]
    meta: ErrorMeta,
}

impl ApiError {
    /// Decodes an error envelope from a response body.
    pub(crate) fn decode(response: Response, body: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => Ok(Self {
                response,
                error: envelope.error,
                meta: envelope.meta,
            }),
            Err(source) => Err(Error::Decode {
                status: response.status,
                raw_body: String::from_utf8_lossy(body).into_owned(),
                source,
            }),
        }
    }

    /// The HTTP status code of the failed response.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// Short rendering: status, category, code and detail.
    pub fn message(&self) -> String {
        format!(
            "status {}, error type: {}, code: {}, detail: {}",
            self.response.status.as_u16(),
            self.error.error_type,
            self.error.code,
            self.error.detail
        )
    }

    /// Full rendering: the short form followed by the request id.
    pub fn full_message(&self) -> String {
        format!("{}, request_id: {}", self.message(), self.meta.request_id)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ApiError {}

/// A specialized `Result` type for Temp Mail API calls.
pub type Result<T> = std::result::Result<T, Error>;
