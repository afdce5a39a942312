//! Notice board listing.

use crate::domain::notice::Notice;
use crate::domain::types::Audience;
use crate::pagination::{Paginated, RawListQuery};
use crate::repository::{NoticeListQuery, NoticeReader};
use crate::services::{ServiceResult, log_repository_error, parse_list_query};

/// Restricts notices to one audience: `everyone`, `teachers` or `parents`.
pub const AUDIENCE_FIELD: &str = "audience";

pub fn list_notices<R>(
    repo: &R,
    raw: &RawListQuery,
    strict: bool,
) -> ServiceResult<Paginated<Notice>>
where
    R: NoticeReader + ?Sized,
{
    let list_query = parse_list_query(raw, strict)?;

    let mut query = NoticeListQuery::new().paginate(list_query.clone());
    if let Some(audience) = raw.text(AUDIENCE_FIELD) {
        query = query.audience(Audience::try_from(audience)?);
    }

    let (total, notices) = repo.list_notices(query).map_err(|err| {
        log_repository_error("Failed to list notices", &err);
        err
    })?;

    Ok(Paginated::new(notices, &list_query, total))
}
