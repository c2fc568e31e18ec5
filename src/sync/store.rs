use crate::db::issues::{self, NewIssue};
use crate::db::PoolError;
use crate::db::newsletters;
use crate::models::newsletter::Newsletter;
use diesel::PgConnection;
use std::collections::HashSet;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{msg}")]
pub struct StoreError {
    pub msg: String,
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        let msg = format!("{:?}", error);

        StoreError { msg }
    }
}

impl From<PoolError> for StoreError {
    fn from(error: PoolError) -> Self {
        StoreError {
            msg: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub id: String,
    pub feed_url: String,
}

/// Everything ingestion needs from the catalog, and nothing more.
#[cfg_attr(test, automock)]
pub trait CatalogStore {
    fn find_sources_with_feed(&mut self) -> Result<Vec<FeedSource>, StoreError>;

    fn find_one(&mut self, id: &str) -> Result<Option<Newsletter>, StoreError>;

    /// Inserts `batch`, skipping rows that conflict on `(newsletter_id, url)`.
    /// Returns the number of rows actually inserted.
    fn upsert_entries(&mut self, batch: &[NewIssue]) -> Result<usize, StoreError>;
}

pub struct PgCatalogStore<'a> {
    connection: &'a mut PgConnection,
}

impl<'a> PgCatalogStore<'a> {
    pub fn new(connection: &'a mut PgConnection) -> Self {
        Self { connection }
    }
}

impl CatalogStore for PgCatalogStore<'_> {
    fn find_sources_with_feed(&mut self) -> Result<Vec<FeedSource>, StoreError> {
        let sources = newsletters::find_with_feed(self.connection)?
            .into_iter()
            .map(|(id, feed_url)| FeedSource { id, feed_url })
            .collect();

        Ok(sources)
    }

    fn find_one(&mut self, id: &str) -> Result<Option<Newsletter>, StoreError> {
        Ok(newsletters::find(self.connection, id)?)
    }

    fn upsert_entries(&mut self, batch: &[NewIssue]) -> Result<usize, StoreError> {
        Ok(issues::create(self.connection, batch)?)
    }
}

/// Catalog kept in memory, seeded at construction.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalogStore {
    newsletters: Vec<Newsletter>,
    issues: Vec<NewIssue>,
    keys: HashSet<(String, String)>,
}

impl MemoryCatalogStore {
    pub fn new(newsletters: Vec<Newsletter>) -> Self {
        Self {
            newsletters,
            ..Self::default()
        }
    }

    pub fn issues(&self) -> &[NewIssue] {
        &self.issues
    }

    pub fn issues_for(&self, newsletter_id: &str) -> Vec<&NewIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.newsletter_id == newsletter_id)
            .collect()
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn find_sources_with_feed(&mut self) -> Result<Vec<FeedSource>, StoreError> {
        let mut sources = self
            .newsletters
            .iter()
            .filter_map(|newsletter| {
                newsletter.rss_url.as_ref().map(|feed_url| FeedSource {
                    id: newsletter.id.clone(),
                    feed_url: feed_url.clone(),
                })
            })
            .collect::<Vec<FeedSource>>();

        sources.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(sources)
    }

    fn find_one(&mut self, id: &str) -> Result<Option<Newsletter>, StoreError> {
        Ok(self
            .newsletters
            .iter()
            .find(|newsletter| newsletter.id == id)
            .cloned())
    }

    fn upsert_entries(&mut self, batch: &[NewIssue]) -> Result<usize, StoreError> {
        let mut inserted = 0;

        for issue in batch {
            let key = (issue.newsletter_id.clone(), issue.url.clone());

            if self.keys.insert(key) {
                self.issues.push(issue.clone());
                inserted += 1;
            }
        }

        Ok(inserted)
    }
}
