use crate::schema::issues;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = issues)]
pub struct Issue {
    pub id: Uuid,
    pub newsletter_id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub author: String,

    pub published_at: DateTime<Utc>,
    pub image_url: String,
    pub snippet: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
