use crate::sync::reader::{self, FeedType, ParseError, RawFeed, RawFeedEntry, ReadFeed};
use atom_syndication::{Entry, Feed as AtomFeed, FixedDateTime};

pub struct AtomReader;

impl ReadFeed for AtomReader {
    fn read_from_bytes(&self, data: &[u8]) -> Result<RawFeed, ParseError> {
        match AtomFeed::read_from(data) {
            Ok(atom_feed) => Ok(RawFeed::from(atom_feed)),
            Err(err) => {
                let msg = format!("atom: {}", err);
                Err(ParseError { msg })
            }
        }
    }
}

impl From<AtomFeed> for RawFeed {
    fn from(feed: AtomFeed) -> Self {
        let entries = feed
            .entries()
            .iter()
            .map(RawFeedEntry::from)
            .collect::<Vec<RawFeedEntry>>();

        RawFeed {
            title: reader::non_empty(Some(feed.title().value.as_str())),
            feed_type: FeedType::Atom,
            entries,
        }
    }
}

impl From<&Entry> for RawFeedEntry {
    fn from(entry: &Entry) -> Self {
        let link = entry
            .links()
            .iter()
            .find(|link| link.rel() == "alternate")
            .or_else(|| entry.links().first())
            .map(|link| link.href());

        RawFeedEntry {
            title: reader::non_empty(Some(entry.title().value.as_str())),
            content: reader::non_empty(entry.content().and_then(|content| content.value())),
            description: reader::non_empty(entry.summary().map(|summary| summary.value.as_str())),
            link: reader::non_empty(link),
            pub_date: entry.published().and_then(present_date),
            published: present_date(entry.updated()),
            author: reader::join_names(entry.authors().iter().map(|person| person.name())),
            creator: reader::join_names(entry.contributors().iter().map(|person| person.name())),
        }
    }
}

// A missing `<updated>` is parsed as the Unix epoch.
fn present_date(date: &FixedDateTime) -> Option<String> {
    if date.timestamp() == 0 && date.timestamp_subsec_nanos() == 0 {
        None
    } else {
        Some(date.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::AtomReader;
    use crate::sync::reader::{FeedType, RawFeedEntry, ReadFeed};
    use std::fs;

    #[test]
    fn it_converts_atom_feed_to_raw_feed() {
        let xml_feed = fs::read("./tests/support/atom_feed_example.xml").unwrap();

        let feed = AtomReader.read_from_bytes(&xml_feed).unwrap();

        assert_eq!(feed.title, Some("Example Feed".to_string()));
        assert_eq!(feed.feed_type, FeedType::Atom);
        assert_eq!(
            feed.entries[0],
            RawFeedEntry::builder()
                .title("Atom-Powered Robots Run Amok")
                .content("<p>Robots <img src='http://example.org/robot.png'> everywhere</p>")
                .description("Some text.")
                .link("http://example.org/2003/12/13/atom03")
                .pub_date("2003-12-13T08:29:29-04:00")
                .published("2003-12-13T18:30:02+00:00")
                .author("Jane Roe")
                .creator("Sam Helper")
                .build()
        );
    }

    #[test]
    fn it_keeps_entries_without_title_and_link() {
        let xml_feed = fs::read("./tests/support/atom_feed_example.xml").unwrap();

        let feed = AtomReader.read_from_bytes(&xml_feed).unwrap();

        let second = &feed.entries[1];
        assert_eq!(second.title, None);
        assert_eq!(second.link, None);
        assert_eq!(second.pub_date, None);
        assert_eq!(second.published, Some("2003-12-14T10:00:00+00:00".to_string()));
    }

    #[test]
    fn it_fails_on_rss_document() {
        let xml_feed = fs::read("./tests/support/rss_feed_example.xml").unwrap();

        assert!(AtomReader.read_from_bytes(&xml_feed).is_err());
    }

    #[test]
    fn it_leaves_missing_dates_absent() {
        let xml_feed = fs::read("./tests/support/atom_feed_without_dates.xml").unwrap();

        let feed = AtomReader.read_from_bytes(&xml_feed).unwrap();

        assert_eq!(
            feed.entries,
            vec![RawFeedEntry::builder()
                .title("Undated entry")
                .link("http://example.org/undated")
                .build()]
        );
    }
}
