use crate::db::issues::NewIssue;
use crate::sync::fetcher::FetchFeed;
use crate::sync::ingest_newsletter_job::IngestionError;
use crate::sync::normalizer;
use crate::sync::reader::{self, FeedType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedPreview {
    pub title: Option<String>,
    pub feed_type: FeedType,
    pub issues: Vec<NewIssue>,
}

/// Fetches and normalizes a feed without storing anything. Issues carry an
/// empty `newsletter_id`.
pub fn preview_feed<F>(fetcher: &F, url: &str) -> Result<FeedPreview, IngestionError>
where
    F: FetchFeed + ?Sized,
{
    let data = fetcher.fetch(url)?;
    let feed = reader::parse(&data)?;

    let issues = feed
        .entries
        .iter()
        .map(|entry| normalizer::normalize(entry, feed.title.as_deref()))
        .collect::<Vec<NewIssue>>();

    log::info!("Previewed {} feed {} with {} issues", feed.feed_type, url, issues.len());

    Ok(FeedPreview {
        title: feed.title,
        feed_type: feed.feed_type,
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::preview_feed;
    use crate::sync::fetcher::{FetchError, MockFetchFeed};
    use crate::sync::ingest_newsletter_job::IngestionError;
    use crate::sync::reader::FeedType;
    use chrono::{TimeZone, Utc};
    use std::fs;

    #[test]
    fn it_previews_rss_feed() {
        let body = fs::read("./tests/support/rss_feed_example.xml").unwrap();
        let mut fetcher = MockFetchFeed::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(move |_| Ok(body.clone()));

        let preview = preview_feed(&fetcher, "http://example.com/feed").unwrap();

        assert_eq!(preview.title, Some("Sample Newsletter".to_string()));
        assert_eq!(preview.feed_type, FeedType::Rss);
        assert_eq!(preview.issues.len(), 3);

        let first = &preview.issues[0];
        assert_eq!(first.newsletter_id, "");
        assert_eq!(first.url, "https://example.com/issues/3");
        assert_eq!(first.image_url, "https://example.com/cover.png");
        assert_eq!(first.snippet, "Hello  readers");
        assert_eq!(first.author, "editor@example.com (Jane Editor)");

        let second = &preview.issues[1];
        assert_eq!(second.title, "Interview");
        assert_eq!(second.author, "John Writer");
        assert_eq!(
            second.published_at,
            Utc.with_ymd_and_hms(2023, 12, 25, 8, 0, 0).unwrap()
        );

        let third = &preview.issues[2];
        assert_eq!(third.title, "Untitled");
        assert_eq!(third.author, "Sample Newsletter");
        assert_eq!(third.content, "");
    }

    #[test]
    fn it_propagates_fetch_errors() {
        let mut fetcher = MockFetchFeed::new();
        fetcher.expect_fetch().returning(|_| {
            Err(FetchError {
                msg: "timeout".to_string(),
            })
        });

        let result = preview_feed(&fetcher, "http://example.com/feed");

        assert_eq!(
            result,
            Err(IngestionError::FetchError {
                msg: "timeout".to_string()
            })
        );
    }
}
