use super::ingest_newsletter_job::{IngestNewsletterJob, IngestionError, SourceOutcome};
use crate::sync::fetcher::{FetchFeed, HttpFetcher};
use crate::sync::store::{CatalogStore, PgCatalogStore};
use crate::Config;
use fang::typetag;
use fang::FangError;
use fang::Queueable;
use fang::Runnable;
use fang::Scheduled;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestionReport {
    pub outcomes: Vec<SourceOutcome>,
}

impl IngestionReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn total_submitted(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
            .sum()
    }

    pub fn outcome(&self, newsletter_id: &str) -> Option<&SourceOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.newsletter_id == newsletter_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IngestJob {}

impl Default for IngestJob {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestJob {
    pub fn new() -> Self {
        IngestJob {}
    }

    /// Ingests every newsletter with a feed url, one after another. A failing
    /// source is recorded in the report and does not stop the run.
    pub fn execute<S, F>(&self, store: &mut S, fetcher: &F) -> Result<IngestionReport, IngestionError>
    where
        S: CatalogStore + ?Sized,
        F: FetchFeed + ?Sized,
    {
        log::info!("Started ingesting newsletter feeds");

        let sources = store.find_sources_with_feed()?;

        let outcomes = sources
            .into_iter()
            .map(|source| IngestNewsletterJob::new(source.id).process(store, fetcher))
            .collect::<Vec<SourceOutcome>>();

        let report = IngestionReport { outcomes };

        log::info!(
            "Finished ingesting newsletter feeds. Sources: {}, succeeded: {}, failed: {}, submitted issues: {}",
            report.outcomes.len(),
            report.succeeded(),
            report.failed(),
            report.total_submitted()
        );

        Ok(report)
    }
}

#[typetag::serde]
impl Runnable for IngestJob {
    fn run(&self, _queue: &dyn Queueable) -> Result<(), FangError> {
        let mut connection = super::pooled_connection()?;
        let mut store = PgCatalogStore::new(&mut connection);

        self.execute(&mut store, &HttpFetcher)?;

        Ok(())
    }

    fn cron(&self) -> Option<Scheduled> {
        Some(Scheduled::CronPattern(Config::ingest_cron_pattern()))
    }

    fn uniq(&self) -> bool {
        true
    }

    fn task_type(&self) -> String {
        super::JOB_TYPE.to_string()
    }
}
