//! Service errors, in place of the service errors of the shared service crate.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Result alias used by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned from the service layer to the HTTP handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The addressed record does not exist.
    #[error("not found")]
    NotFound,
    /// The write clashes with existing data, e.g. a duplicate email.
    #[error("conflict with existing data")]
    Conflict,
    /// Submitted form data failed validation.
    #[error("invalid form: {0}")]
    Form(String),
    /// Anything the caller cannot fix.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(_) => ServiceError::Conflict,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
