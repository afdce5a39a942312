//! Data access for the listing endpoints.
//!
//! Readers take a [`ListQuery`] and forward its `limit`/`offset` verbatim.
//! The descriptor's `sortBy` is client-controlled, so every entity maps it
//! through a [`SortColumn`] allow-list before it reaches SQL.

use crate::db::{DbConnection, DbPool};
use crate::domain::notice::{NewNotice, Notice};
use crate::domain::student::{NewStudent, Student};
use crate::domain::types::Audience;
use crate::pagination::ListQuery;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod notice;
pub mod student;

/// Closed set of columns an entity can be sorted by.
pub trait SortColumn: Sized + Copy + 'static {
    /// Column used when no `sortBy` was supplied.
    const DEFAULT: Self;
    /// Accepted `sortBy` names, matched exactly.
    const ALLOWED: &'static [(&'static str, Self)];

    /// Maps a client `sortBy` onto a column. Blank means default; anything
    /// not in [`Self::ALLOWED`] is rejected.
    fn resolve(sort_by: Option<&str>) -> RepositoryResult<Self> {
        let Some(name) = sort_by.filter(|name| !name.trim().is_empty()) else {
            return Ok(Self::DEFAULT);
        };

        Self::ALLOWED
            .iter()
            .find(|(allowed, _)| *allowed == name)
            .map(|(_, column)| *column)
            .ok_or_else(|| RepositoryError::InvalidSort(format!("cannot sort by {name:?}")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentSortColumn {
    Id,
    FirstName,
    LastName,
    Grade,
    EnrolledAt,
}

impl SortColumn for StudentSortColumn {
    const DEFAULT: Self = StudentSortColumn::LastName;
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("id", StudentSortColumn::Id),
        ("firstName", StudentSortColumn::FirstName),
        ("lastName", StudentSortColumn::LastName),
        ("grade", StudentSortColumn::Grade),
        ("enrolledAt", StudentSortColumn::EnrolledAt),
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeSortColumn {
    Id,
    Title,
    PublishedAt,
}

impl SortColumn for NoticeSortColumn {
    const DEFAULT: Self = NoticeSortColumn::PublishedAt;
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("id", NoticeSortColumn::Id),
        ("title", NoticeSortColumn::Title),
        ("publishedAt", NoticeSortColumn::PublishedAt),
    ];
}

#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub class_name: Option<String>,
    pub search: Option<String>,
    pub pagination: Option<ListQuery>,
}

impl StudentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, list_query: ListQuery) -> Self {
        self.pagination = Some(list_query);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoticeListQuery {
    pub audience: Option<Audience>,
    pub pagination: Option<ListQuery>,
}

impl NoticeListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audience(mut self, audience: Audience) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn paginate(mut self, list_query: ListQuery) -> Self {
        self.pagination = Some(list_query);
        self
    }
}

pub trait StudentReader {
    fn list_students(&self, query: StudentListQuery) -> RepositoryResult<(u64, Vec<Student>)>;
}

pub trait StudentWriter {
    fn create_students(&self, new_students: &[NewStudent]) -> RepositoryResult<usize>;
}

pub trait NoticeReader {
    fn list_notices(&self, query: NoticeListQuery) -> RepositoryResult<(u64, Vec<Notice>)>;
}

pub trait NoticeWriter {
    fn create_notices(&self, new_notices: &[NewNotice]) -> RepositoryResult<usize>;
}

/// Escape character paired with [`contains_pattern`] in `LIKE ... ESCAPE`.
const LIKE_ESCAPE: char = '\\';

/// `LIKE` pattern matching `term` anywhere, with its own `%` and `_` taken
/// literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}
