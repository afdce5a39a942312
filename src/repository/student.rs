use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::student::{NewStudent, Student};
use crate::models::student::{NewStudent as DbNewStudent, Student as DbStudent};
use crate::pagination::SortOrder;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, LIKE_ESCAPE, SortColumn, StudentListQuery, StudentReader, StudentSortColumn,
    StudentWriter, contains_pattern,
};

impl StudentReader for DieselRepository {
    fn list_students(&self, query: StudentListQuery) -> RepositoryResult<(u64, Vec<Student>)> {
        use crate::schema::students;

        let (column, order) = match &query.pagination {
            Some(list) => (StudentSortColumn::resolve(list.sort_by())?, list.sort_order()),
            None => (StudentSortColumn::DEFAULT, SortOrder::Asc),
        };

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = students::table.into_boxed::<Sqlite>();

            if let Some(class_name) = &query.class_name {
                items = items.filter(students::class_name.eq(class_name.clone()));
            }
            if let Some(term) = &query.search {
                let pattern = contains_pattern(term);
                items = items.filter(
                    students::first_name
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE)
                        .or(students::last_name.like(pattern).escape(LIKE_ESCAPE)),
                );
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as u64;

        let mut items = match (column, order) {
            (StudentSortColumn::Id, SortOrder::Asc) => query_builder().order(students::id.asc()),
            (StudentSortColumn::Id, SortOrder::Desc) => {
                query_builder().order(students::id.desc())
            }
            (StudentSortColumn::FirstName, SortOrder::Asc) => {
                query_builder().order(students::first_name.asc())
            }
            (StudentSortColumn::FirstName, SortOrder::Desc) => {
                query_builder().order(students::first_name.desc())
            }
            (StudentSortColumn::LastName, SortOrder::Asc) => {
                query_builder().order(students::last_name.asc())
            }
            (StudentSortColumn::LastName, SortOrder::Desc) => {
                query_builder().order(students::last_name.desc())
            }
            (StudentSortColumn::Grade, SortOrder::Asc) => {
                query_builder().order(students::grade.asc())
            }
            (StudentSortColumn::Grade, SortOrder::Desc) => {
                query_builder().order(students::grade.desc())
            }
            (StudentSortColumn::EnrolledAt, SortOrder::Asc) => {
                query_builder().order(students::enrolled_at.asc())
            }
            (StudentSortColumn::EnrolledAt, SortOrder::Desc) => {
                query_builder().order(students::enrolled_at.desc())
            }
        }
        // Stable pages when the sort column has duplicates.
        .then_order_by(students::id.asc());

        if let Some(list) = &query.pagination {
            items = items.limit(list.limit() as i64).offset(list.offset() as i64);
        }

        let students = items
            .load::<DbStudent>(&mut conn)?
            .into_iter()
            .map(Student::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((total, students))
    }
}

impl StudentWriter for DieselRepository {
    fn create_students(&self, new_students: &[NewStudent]) -> RepositoryResult<usize> {
        use crate::schema::students;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewStudent> = new_students.iter().map(Into::into).collect();
        let affected = diesel::insert_into(students::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
