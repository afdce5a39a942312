use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClassName, Grade, PersonName, StudentId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub class_name: ClassName,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub grade: Grade,
    pub enrolled_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewStudent {
    pub class_name: ClassName,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub grade: Grade,
    pub enrolled_at: NaiveDateTime,
}

impl NewStudent {
    #[must_use]
    pub fn new(
        class_name: ClassName,
        first_name: PersonName,
        last_name: PersonName,
        grade: Grade,
        enrolled_at: NaiveDateTime,
    ) -> Self {
        Self {
            class_name,
            first_name,
            last_name,
            grade,
            enrolled_at,
        }
    }
}
