#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use school_dashboard::db::{DbPool, establish_connection_pool, run_migrations};
use school_dashboard::domain::notice::NewNotice;
use school_dashboard::domain::student::NewStudent;
use school_dashboard::domain::types::{Audience, ClassName, Grade, NoticeTitle, PersonName};
use school_dashboard::repository::{DieselRepository, NoticeWriter, StudentWriter};

/// Migrated SQLite database in a temporary directory, removed on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("school.db");
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("connection pool");
        run_migrations(&pool).expect("migrations");
        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

pub fn day(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, day)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// Seeds 25 students. Student `n` is "First{n:02} Last{n:02}"; odd numbers
/// are in 7B (grade 7), even numbers in 8A (grade 8).
pub fn seed_students(repo: &DieselRepository) {
    let students = (1..=25)
        .map(|n| {
            let (class_name, grade) = if n % 2 == 1 { ("7B", 7) } else { ("8A", 8) };
            NewStudent::new(
                ClassName::new(class_name).unwrap(),
                PersonName::new(format!("First{n:02}")).unwrap(),
                PersonName::new(format!("Last{n:02}")).unwrap(),
                Grade::new(grade).unwrap(),
                day(n),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(repo.create_students(&students).unwrap(), 25);
}

/// Seeds six notices published on consecutive days, alternating audiences.
pub fn seed_notices(repo: &DieselRepository) {
    let audiences = [Audience::Everyone, Audience::Teachers, Audience::Parents];
    let notices = (1..=6)
        .map(|n| NewNotice {
            title: NoticeTitle::new(format!("Notice {n}")).unwrap(),
            body: format!("Body {n}"),
            audience: audiences[(n as usize - 1) % 3],
            published_at: day(n),
        })
        .collect::<Vec<_>>();
    assert_eq!(repo.create_notices(&notices).unwrap(), 6);
}
