use thiserror::Error;
use validator::ValidationErrors;

use crate::client::errors::ClientError;
use crate::domain::filter::FilterError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;

/// Failures reported to the presentation layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Service failure ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Decode failure: {0}")]
    Decode(String),

    /// Rejected on the client before anything was sent.
    #[error("Validation failure: {0}")]
    Validation(String),

    /// A create/update/delete is still pending.
    #[error("Another submission is still in progress")]
    SubmitInProgress,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(message) => ServiceError::Transport(message),
            ClientError::Service { status, message } => ServiceError::Service { status, message },
            ClientError::Decode(message) => ServiceError::Decode(message),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<FilterError> for ServiceError {
    fn from(err: FilterError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
