//! Error types for the API suites
//!
//! Transport-level failures are the only fatal request errors; an HTTP
//! error status is returned to the caller as a normal response so the
//! test can assert on it. See [`crate::client`] for that asymmetry.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Login response did not include a token")]
    MissingToken,

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Schema '{name}' failed to load: {reason}")]
    SchemaLoad { name: String, reason: String },

    #[error(transparent)]
    Common(#[from] storecheck_common::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Map a reqwest failure onto the transport taxonomy.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_connect() {
            ApiError::Connection(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
