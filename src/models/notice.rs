use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::notice::{NewNotice as DomainNewNotice, Notice as DomainNotice};
use crate::domain::types::{Audience, NoticeId, NoticeTitle, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::notices)]
/// Diesel model for [`crate::domain::notice::Notice`].
pub struct Notice {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub audience: String,
    pub published_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notices)]
pub struct NewNotice<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub audience: &'a str,
    pub published_at: NaiveDateTime,
}

impl TryFrom<Notice> for DomainNotice {
    type Error = TypeConstraintError;

    fn try_from(notice: Notice) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NoticeId::new(notice.id)?,
            title: NoticeTitle::new(notice.title)?,
            body: notice.body,
            audience: Audience::try_from(notice.audience.as_str())?,
            published_at: notice.published_at,
        })
    }
}

impl<'a> From<&'a DomainNewNotice> for NewNotice<'a> {
    fn from(notice: &'a DomainNewNotice) -> Self {
        Self {
            title: notice.title.as_str(),
            body: notice.body.as_str(),
            audience: notice.audience.as_str(),
            published_at: notice.published_at,
        }
    }
}
