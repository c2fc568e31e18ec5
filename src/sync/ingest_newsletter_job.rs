use crate::db::issues::NewIssue;
use crate::sync::fetcher::{FetchError, FetchFeed, HttpFetcher};
use crate::sync::normalizer;
use crate::sync::reader::{self, ParseError};
use crate::sync::store::{CatalogStore, PgCatalogStore, StoreError};
use fang::typetag;
use fang::FangError;
use fang::Queueable;
use fang::Runnable;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionState {
    Pending,
    Fetching,
    Parsing,
    Normalizing,
    Upserting,
    Done,
    Failed,
}

impl fmt::Display for IngestionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IngestionState::Pending => "pending",
            IngestionState::Fetching => "fetching",
            IngestionState::Parsing => "parsing",
            IngestionState::Normalizing => "normalizing",
            IngestionState::Upserting => "upserting",
            IngestionState::Done => "done",
            IngestionState::Failed => "failed",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestionError {
    #[error("failed to fetch feed: {msg}")]
    FetchError { msg: String },
    #[error("failed to parse feed: {msg}")]
    ParseError { msg: String },
    #[error("source unavailable: {msg}")]
    SourceUnavailable { msg: String },
    #[error("store failure: {msg}")]
    StoreError { msg: String },
}

impl From<FetchError> for IngestionError {
    fn from(error: FetchError) -> Self {
        IngestionError::FetchError { msg: error.msg }
    }
}

impl From<ParseError> for IngestionError {
    fn from(error: ParseError) -> Self {
        IngestionError::ParseError { msg: error.msg }
    }
}

impl From<StoreError> for IngestionError {
    fn from(error: StoreError) -> Self {
        IngestionError::StoreError { msg: error.msg }
    }
}

impl From<IngestionError> for FangError {
    fn from(error: IngestionError) -> Self {
        let description = format!("{:?}", error);

        FangError { description }
    }
}

/// Result of ingesting one newsletter. `state` is `Done` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    pub newsletter_id: String,
    pub state: IngestionState,
    pub result: Result<usize, IngestionError>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IngestNewsletterJob {
    newsletter_id: String,
}

#[typetag::serde]
impl Runnable for IngestNewsletterJob {
    fn run(&self, _queue: &dyn Queueable) -> Result<(), FangError> {
        let mut connection = super::pooled_connection()?;
        let mut store = PgCatalogStore::new(&mut connection);

        // failures are logged by `process`; there is nothing to retry
        self.process(&mut store, &HttpFetcher);

        Ok(())
    }

    fn task_type(&self) -> String {
        super::JOB_TYPE.to_string()
    }
}

impl IngestNewsletterJob {
    pub fn new(newsletter_id: impl Into<String>) -> Self {
        Self {
            newsletter_id: newsletter_id.into(),
        }
    }

    pub fn newsletter_id(&self) -> &str {
        &self.newsletter_id
    }

    /// Ingests the newsletter's feed and returns the number of issues
    /// submitted to the store. Already stored issues are counted too.
    pub fn execute<S, F>(&self, store: &mut S, fetcher: &F) -> Result<usize, IngestionError>
    where
        S: CatalogStore + ?Sized,
        F: FetchFeed + ?Sized,
    {
        self.process(store, fetcher).result
    }

    pub fn process<S, F>(&self, store: &mut S, fetcher: &F) -> SourceOutcome
    where
        S: CatalogStore + ?Sized,
        F: FetchFeed + ?Sized,
    {
        let mut state = IngestionState::Pending;

        log::info!("Started ingesting newsletter {}", self.newsletter_id);

        let result = self.ingest(store, fetcher, &mut state);

        match &result {
            Ok(count) => log::info!(
                "Finished ingesting newsletter {}. Submitted issues: {}",
                self.newsletter_id,
                count
            ),
            Err(error) => {
                log::error!(
                    "Failed to ingest newsletter {} while {}: {}",
                    self.newsletter_id,
                    state,
                    error
                );

                self.transition(&mut state, IngestionState::Failed);
            }
        }

        SourceOutcome {
            newsletter_id: self.newsletter_id.clone(),
            state,
            result,
        }
    }

    fn ingest<S, F>(
        &self,
        store: &mut S,
        fetcher: &F,
        state: &mut IngestionState,
    ) -> Result<usize, IngestionError>
    where
        S: CatalogStore + ?Sized,
        F: FetchFeed + ?Sized,
    {
        let newsletter =
            store
                .find_one(&self.newsletter_id)?
                .ok_or_else(|| IngestionError::SourceUnavailable {
                    msg: format!("Newsletter {} not found", self.newsletter_id),
                })?;

        let feed_url = newsletter
            .feed_url()
            .ok_or_else(|| IngestionError::SourceUnavailable {
                msg: format!("Newsletter {} has no feed url", self.newsletter_id),
            })?
            .to_string();

        self.transition(state, IngestionState::Fetching);
        let data = fetcher.fetch(&feed_url)?;

        self.transition(state, IngestionState::Parsing);
        let feed = reader::parse(&data)?;

        self.transition(state, IngestionState::Normalizing);
        let batch = feed
            .entries
            .iter()
            .map(|entry| {
                let mut issue = normalizer::normalize(entry, feed.title.as_deref());
                issue.newsletter_id = self.newsletter_id.clone();

                issue
            })
            .collect::<Vec<NewIssue>>();

        if batch.is_empty() {
            log::info!("Feed of newsletter {} has no entries", self.newsletter_id);

            self.transition(state, IngestionState::Done);
            return Ok(0);
        }

        self.transition(state, IngestionState::Upserting);
        let inserted = store.upsert_entries(&batch)?;

        log::debug!(
            "Newsletter {}: {} new issues out of {}",
            self.newsletter_id,
            inserted,
            batch.len()
        );

        self.transition(state, IngestionState::Done);

        Ok(batch.len())
    }

    fn transition(&self, state: &mut IngestionState, next: IngestionState) {
        log::debug!("Newsletter {}: {} -> {}", self.newsletter_id, state, next);

        *state = next;
    }
}
