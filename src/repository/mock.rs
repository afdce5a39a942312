//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::notice::{NewNotice, Notice};
use crate::domain::student::{NewStudent, Student};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    NoticeListQuery, NoticeReader, NoticeWriter, StudentListQuery, StudentReader, StudentWriter,
};

mock! {
    pub Repository {}

    impl StudentReader for Repository {
        fn list_students(&self, query: StudentListQuery) -> RepositoryResult<(u64, Vec<Student>)>;
    }

    impl StudentWriter for Repository {
        fn create_students(&self, new_students: &[NewStudent]) -> RepositoryResult<usize>;
    }

    impl NoticeReader for Repository {
        fn list_notices(&self, query: NoticeListQuery) -> RepositoryResult<(u64, Vec<Notice>)>;
    }

    impl NoticeWriter for Repository {
        fn create_notices(&self, new_notices: &[NewNotice]) -> RepositoryResult<usize>;
    }
}
