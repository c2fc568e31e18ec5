use crate::db;
use crate::schema::newsletters;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Identifiable, Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = newsletters)]
pub struct Newsletter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub subscriber_count: i32,
    #[serde(default)]
    pub frequency: String,
    pub website_url: Option<String>,
    pub rss_url: Option<String>,

    #[serde(default = "db::current_time")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "db::current_time")]
    pub updated_at: DateTime<Utc>,
}

impl Newsletter {
    /// The feed URL if one is configured and not blank.
    pub fn feed_url(&self) -> Option<&str> {
        self.rss_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
