//! Error types for collaborator clients.

use thiserror::Error;

/// Result type for collaborator calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failure of a remote collaborator (completion, inference or store).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Collaborator has no usable configuration (missing key, no backend)
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Transport failure (connection refused, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// 2xx response that reported `success: false`
    #[error("Request unsuccessful: {0}")]
    Unsuccessful(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
