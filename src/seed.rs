use crate::db::newsletters::{self, NewNewsletter};
use crate::models::newsletter::Newsletter;
use diesel::PgConnection;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid seed file {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to insert newsletters: {0:?}")]
    Insert(#[from] diesel::result::Error),
}

/// Reads a JSON array of newsletters.
pub fn load_newsletters(path: impl AsRef<Path>) -> Result<Vec<Newsletter>, SeedError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let data = fs::read(path).map_err(|source| SeedError::Read {
        path: display.clone(),
        source,
    })?;

    serde_json::from_slice(&data).map_err(|source| SeedError::Decode {
        path: display,
        source,
    })
}

/// Inserts seed newsletters; ids already in the catalog are left as they are.
pub fn insert_newsletters(
    conn: &mut PgConnection,
    seed: Vec<Newsletter>,
) -> Result<usize, SeedError> {
    let records = seed
        .into_iter()
        .map(NewNewsletter::from)
        .collect::<Vec<NewNewsletter>>();

    let inserted = newsletters::create(conn, &records)?;

    log::info!("Inserted {} of {} seed newsletters", inserted, records.len());

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::{load_newsletters, SeedError};

    #[test]
    fn it_loads_newsletters_with_defaults() {
        let newsletters = load_newsletters("./tests/support/seed_newsletters.json").unwrap();

        assert_eq!(newsletters.len(), 2);

        let stratechery = &newsletters[0];
        assert_eq!(stratechery.id, "stratechery");
        assert_eq!(stratechery.feed_url(), Some("https://stratechery.com/feed/"));
        assert_eq!(stratechery.categories, vec!["Technology".to_string()]);
        assert_eq!(stratechery.subscriber_count, 25000);

        let no_feed = &newsletters[1];
        assert_eq!(no_feed.id, "no-feed");
        assert_eq!(no_feed.feed_url(), None);
        assert!(no_feed.categories.is_empty());
        assert_eq!(no_feed.author_name, "");
    }

    #[test]
    fn it_fails_for_missing_file() {
        let result = load_newsletters("./tests/support/missing.json");

        assert!(matches!(result, Err(SeedError::Read { .. })));
    }

    #[test]
    fn it_fails_for_invalid_json() {
        let result = load_newsletters("./tests/support/rss_feed_example.xml");

        assert!(matches!(result, Err(SeedError::Decode { .. })));
    }
}
