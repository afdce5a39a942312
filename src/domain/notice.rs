use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Audience, NoticeId, NoticeTitle};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: NoticeId,
    pub title: NoticeTitle,
    pub body: String,
    pub audience: Audience,
    pub published_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewNotice {
    pub title: NoticeTitle,
    pub body: String,
    pub audience: Audience,
    pub published_at: NaiveDateTime,
}
