use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct JobListing {
    pub id: i64,
    pub title: String,
    pub company: String,
    /// Slash-separated skill list, e.g. "React/TypeScript".
    pub skills: String,
    pub salary: String,
    pub link: String,
    pub created_at: NaiveDateTime,
}
