use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::student::{NewStudent as DomainNewStudent, Student as DomainStudent};
use crate::domain::types::{ClassName, Grade, PersonName, StudentId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::students)]
/// Diesel model for [`crate::domain::student::Student`].
pub struct Student {
    pub id: i32,
    pub class_name: String,
    pub first_name: String,
    pub last_name: String,
    pub grade: i32,
    pub enrolled_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::students)]
/// Insertable form of [`Student`].
pub struct NewStudent<'a> {
    pub class_name: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub grade: i32,
    pub enrolled_at: NaiveDateTime,
}

impl TryFrom<Student> for DomainStudent {
    type Error = TypeConstraintError;

    fn try_from(student: Student) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StudentId::new(student.id)?,
            class_name: ClassName::new(student.class_name)?,
            first_name: PersonName::new(student.first_name)?,
            last_name: PersonName::new(student.last_name)?,
            grade: Grade::new(student.grade)?,
            enrolled_at: student.enrolled_at,
        })
    }
}

impl<'a> From<&'a DomainNewStudent> for NewStudent<'a> {
    fn from(student: &'a DomainNewStudent) -> Self {
        Self {
            class_name: student.class_name.as_str(),
            first_name: student.first_name.as_str(),
            last_name: student.last_name.as_str(),
            grade: student.grade.get(),
            enrolled_at: student.enrolled_at,
        }
    }
}
