use crate::db;
use fang::FangError;

pub mod fetcher;
pub mod ingest_job;
pub mod ingest_newsletter_job;
pub mod normalizer;
pub mod preview;
pub mod reader;
pub mod store;

pub use ingest_job::{IngestJob, IngestionReport};
pub use ingest_newsletter_job::{IngestNewsletterJob, IngestionError, IngestionState, SourceOutcome};
pub use store::{CatalogStore, MemoryCatalogStore, PgCatalogStore};

pub const JOB_TYPE: &str = "ingest";

fn pooled_connection() -> Result<db::PooledConnection, FangError> {
    db::connection().map_err(|error| FangError {
        description: format!("{:?}", error),
    })
}
