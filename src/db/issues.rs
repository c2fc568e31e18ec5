use crate::models::issue::Issue;
use crate::schema::issues;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

// Postgres caps bind parameters at 65535 per statement.
const INSERT_CHUNK_SIZE: usize = 1000;

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = issues)]
pub struct NewIssue {
    pub newsletter_id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub image_url: String,
    pub snippet: String,
}

/// Inserts issues in one transaction. Rows conflicting on `(newsletter_id, url)`
/// are skipped, so the returned count only includes new rows.
pub fn create(conn: &mut PgConnection, new_issues: &[NewIssue]) -> Result<usize, Error> {
    conn.transaction::<_, Error, _>(|conn| {
        let mut inserted = 0;

        for chunk in new_issues.chunks(INSERT_CHUNK_SIZE) {
            inserted += diesel::insert_into(issues::table)
                .values(chunk)
                .on_conflict((issues::newsletter_id, issues::url))
                .do_nothing()
                .execute(conn)?;
        }

        Ok(inserted)
    })
}

pub fn find(conn: &mut PgConnection, newsletter_id: &str) -> Result<Vec<Issue>, Error> {
    issues::table
        .filter(issues::newsletter_id.eq(newsletter_id))
        .order(issues::published_at.desc())
        .load::<Issue>(conn)
}

pub fn count(conn: &mut PgConnection, newsletter_id: &str) -> Result<i64, Error> {
    issues::table
        .filter(issues::newsletter_id.eq(newsletter_id))
        .count()
        .get_result::<i64>(conn)
}
