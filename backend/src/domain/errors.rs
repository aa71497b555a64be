//! Domain error types shared by all services.
use thiserror::Error;

use crate::domain::reporting::ReportError;

/// Errors the REST layer translates into HTTP statuses. Anything that is
/// not a contract violation, a missing record, or a credential problem is
/// an internal failure.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Unauthorized(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ReportError> for DomainError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidArgument(msg) => DomainError::InvalidInput(msg),
        }
    }
}
