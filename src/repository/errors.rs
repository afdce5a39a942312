use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Failures of the listing data layer.
///
/// Listings never look up a single row, so there is no "not found" case: an
/// empty page is a successful read.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// `sortBy` named a column outside the entity's allow-list.
    #[error("Unsupported sort: {0}")]
    InvalidSort(String),

    /// A stored row could not be turned into a domain value.
    #[error("Invalid row: {0}")]
    ValidationError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => RepositoryError::ConstraintViolation(info.message().to_string()),
            DieselError::DeserializationError(e) => RepositoryError::ValidationError(e.to_string()),
            other => RepositoryError::DatabaseError(other.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}
