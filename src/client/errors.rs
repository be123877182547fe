use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Failures surfaced by the remote collection client. Nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No usable response: connection refused, timeout, broken body stream.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Non-success status with the message supplied by the service.
    #[error("Service failure ({status}): {message}")]
    Service { status: u16, message: String },

    /// Response arrived but its payload could not be understood.
    #[error("Decode failure: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_timeout() {
            ClientError::Transport(format!("Request timed out: {err}"))
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(format!("Malformed payload: {err}"))
    }
}

impl From<TypeConstraintError> for ClientError {
    fn from(err: TypeConstraintError) -> Self {
        ClientError::Decode(format!("Invalid payload value: {err}"))
    }
}
