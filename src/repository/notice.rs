use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::notice::{NewNotice, Notice};
use crate::models::notice::{NewNotice as DbNewNotice, Notice as DbNotice};
use crate::pagination::SortOrder;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, NoticeListQuery, NoticeReader, NoticeSortColumn, NoticeWriter, SortColumn,
};

impl NoticeReader for DieselRepository {
    fn list_notices(&self, query: NoticeListQuery) -> RepositoryResult<(u64, Vec<Notice>)> {
        use crate::schema::notices;

        let (column, order) = match &query.pagination {
            Some(list) => (NoticeSortColumn::resolve(list.sort_by())?, list.sort_order()),
            None => (NoticeSortColumn::DEFAULT, SortOrder::Asc),
        };

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = notices::table.into_boxed::<Sqlite>();

            if let Some(audience) = query.audience {
                items = items.filter(notices::audience.eq(audience.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as u64;

        let mut items = match (column, order) {
            (NoticeSortColumn::Id, SortOrder::Asc) => query_builder().order(notices::id.asc()),
            (NoticeSortColumn::Id, SortOrder::Desc) => query_builder().order(notices::id.desc()),
            (NoticeSortColumn::Title, SortOrder::Asc) => {
                query_builder().order(notices::title.asc())
            }
            (NoticeSortColumn::Title, SortOrder::Desc) => {
                query_builder().order(notices::title.desc())
            }
            (NoticeSortColumn::PublishedAt, SortOrder::Asc) => {
                query_builder().order(notices::published_at.asc())
            }
            (NoticeSortColumn::PublishedAt, SortOrder::Desc) => {
                query_builder().order(notices::published_at.desc())
            }
        }
        .then_order_by(notices::id.asc());

        if let Some(list) = &query.pagination {
            items = items.limit(list.limit() as i64).offset(list.offset() as i64);
        }

        let notices = items
            .load::<DbNotice>(&mut conn)?
            .into_iter()
            .map(Notice::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((total, notices))
    }
}

impl NoticeWriter for DieselRepository {
    fn create_notices(&self, new_notices: &[NewNotice]) -> RepositoryResult<usize> {
        use crate::schema::notices;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewNotice> = new_notices.iter().map(Into::into).collect();
        let affected = diesel::insert_into(notices::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
