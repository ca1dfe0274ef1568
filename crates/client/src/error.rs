//! Client error types.

use thiserror::Error;

/// Errors that can occur while querying the status service.
///
/// Every variant leads the affected query to the `Failed` state; the
/// variants only differ in what gets logged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed after a connection was made, or its body could
    /// not be read.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured base URL or a joined route is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The service answered with a non-2xx status.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// A 2xx body that does not have the expected shape.
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// No connection could be made to the service (refused, DNS failure,
    /// unreachable host).
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for client results.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
