//! Error conversion glue between the domain, repository and service layers.
//!
//! The domain layer must not depend on repository or service error types.

use crate::domain::types::TypeConstraintError;
use crate::pagination::ListQueryError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::BadRequest(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::InvalidSort(message) => ServiceError::BadRequest(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<ListQueryError> for ServiceError {
    fn from(val: ListQueryError) -> Self {
        ServiceError::BadRequest(val.to_string())
    }
}
