//! Student listing.

use crate::domain::student::Student;
use crate::pagination::{Paginated, RawListQuery};
use crate::repository::{StudentListQuery, StudentReader};
use crate::services::{ServiceResult, log_repository_error, parse_list_query};

/// Exact-match class filter, e.g. `class=7B`.
pub const CLASS_FIELD: &str = "class";
/// Substring match on first or last name.
pub const SEARCH_FIELD: &str = "search";

/// Returns one page of students for the raw request parameters.
pub fn list_students<R>(
    repo: &R,
    raw: &RawListQuery,
    strict: bool,
) -> ServiceResult<Paginated<Student>>
where
    R: StudentReader + ?Sized,
{
    let list_query = parse_list_query(raw, strict)?;

    let mut query = StudentListQuery::new().paginate(list_query.clone());
    if let Some(class_name) = raw.text(CLASS_FIELD) {
        query = query.class_name(class_name);
    }
    if let Some(term) = raw.text(SEARCH_FIELD) {
        query = query.search(term);
    }

    let (total, students) = repo.list_students(query).map_err(|err| {
        log_repository_error("Failed to list students", &err);
        err
    })?;

    Ok(Paginated::new(students, &list_query, total))
}
