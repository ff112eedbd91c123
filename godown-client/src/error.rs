//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation failure, raised before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session invalid or expired (HTTP 401)
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// Permission denied (HTTP 403 or a denied local gate check)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-2xx response with a body; the server message is verbatim
    #[error("Request failed ({status}): {message}")]
    Server { status: u16, message: String },

    /// No response received (connectivity or timeout)
    #[error("Network error - please check your connection")]
    Network(#[source] reqwest::Error),

    /// Image upload failure; always aborts the submission
    #[error("Image upload failed: {0}")]
    Upload(#[source] Box<ClientError>),

    /// 2xx response with an undecodable body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token persistence failure
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Operation not allowed in the current pipeline state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The consuming view went away mid-flight
    #[error("Operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// True when the error means the session is no longer valid and the
    /// caller must force a logout.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Unauthorized => true,
            Self::Upload(inner) => inner.is_auth_error(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
