//! Services turning raw listing requests into repository calls.

use thiserror::Error;

use crate::pagination::{ListQuery, RawListQuery, normalize, normalize_strict};
use crate::repository::errors::RepositoryError;

pub mod notices;
pub mod students;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Builds the list descriptor, clamping by default or rejecting when
/// `strict` is set.
pub fn parse_list_query(raw: &RawListQuery, strict: bool) -> ServiceResult<ListQuery> {
    if !strict {
        return Ok(normalize(raw));
    }

    normalize_strict(raw).map_err(|err| {
        log::warn!("Rejected list query: {err}");
        ServiceError::from(err)
    })
}

fn log_repository_error(context: &str, err: &RepositoryError) {
    match err {
        RepositoryError::InvalidSort(_) => log::warn!("{context}: {err}"),
        _ => log::error!("{context}: {err}"),
    }
}
