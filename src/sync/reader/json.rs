use crate::sync::reader::{self, FeedType, ParseError, RawFeed, RawFeedEntry, ReadFeed};
use feed_rs::model::{Entry, Feed, FeedType as ParsedFeedType};
use feed_rs::parser;
use serde_json::Value;

pub struct JsonReader;

impl ReadFeed for JsonReader {
    fn read_from_bytes(&self, data: &[u8]) -> Result<RawFeed, ParseError> {
        if let Err(err) = serde_json::from_slice::<Value>(data) {
            let msg = format!("json: {}", err);
            return Err(ParseError { msg });
        }

        match parser::parse(data) {
            Ok(feed) if matches!(feed.feed_type, ParsedFeedType::JSON) => Ok(RawFeed::from(feed)),
            Ok(_) => Err(ParseError {
                msg: "json: document is not a JSON feed".to_string(),
            }),
            Err(err) => {
                let msg = format!("json: {:?}", err);
                Err(ParseError { msg })
            }
        }
    }
}

impl From<Feed> for RawFeed {
    fn from(feed: Feed) -> Self {
        let entries = feed
            .entries
            .into_iter()
            .map(RawFeedEntry::from)
            .collect::<Vec<RawFeedEntry>>();

        RawFeed {
            title: feed
                .title
                .and_then(|title| reader::non_empty(Some(title.content.as_str()))),
            feed_type: FeedType::Json,
            entries,
        }
    }
}

impl From<Entry> for RawFeedEntry {
    fn from(entry: Entry) -> Self {
        RawFeedEntry {
            title: entry
                .title
                .and_then(|title| reader::non_empty(Some(title.content.as_str()))),
            content: entry
                .content
                .and_then(|content| reader::non_empty(content.body.as_deref())),
            description: entry
                .summary
                .and_then(|summary| reader::non_empty(Some(summary.content.as_str()))),
            link: entry
                .links
                .first()
                .and_then(|link| reader::non_empty(Some(link.href.as_str()))),
            pub_date: entry.published.map(|date| date.to_rfc3339()),
            published: entry.updated.map(|date| date.to_rfc3339()),
            author: reader::join_names(entry.authors.iter().map(|person| person.name.as_str())),
            creator: None,
        }
    }
}
