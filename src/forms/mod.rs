//! Form definitions backing the post create/edit dialogs.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod post;

#[derive(Debug, Error)]
/// Why a submitted dialog could not be turned into a domain value.
pub enum FormError {
    #[error("form is invalid: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid field value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}
