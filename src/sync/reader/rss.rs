use crate::sync::reader::{self, FeedType, ParseError, RawFeed, RawFeedEntry, ReadFeed};
use rss::{Channel, Item};

pub struct RssReader;

impl ReadFeed for RssReader {
    fn read_from_bytes(&self, data: &[u8]) -> Result<RawFeed, ParseError> {
        match Channel::read_from(data) {
            Ok(channel) => Ok(RawFeed::from(channel)),
            Err(err) => {
                let msg = format!("rss: {}", err);
                Err(ParseError { msg })
            }
        }
    }
}

impl From<Channel> for RawFeed {
    fn from(channel: Channel) -> Self {
        let entries = channel
            .items()
            .iter()
            .map(RawFeedEntry::from)
            .collect::<Vec<RawFeedEntry>>();

        RawFeed {
            title: reader::non_empty(Some(channel.title())),
            feed_type: FeedType::Rss,
            entries,
        }
    }
}

impl From<&Item> for RawFeedEntry {
    fn from(item: &Item) -> Self {
        let dublin_core = item.dublin_core_ext();

        RawFeedEntry {
            title: reader::non_empty(item.title()),
            content: reader::non_empty(item.content()),
            description: reader::non_empty(item.description()),
            link: reader::non_empty(item.link()),
            pub_date: reader::non_empty(item.pub_date()),
            published: dublin_core
                .and_then(|ext| ext.dates().first())
                .and_then(|date| reader::non_empty(Some(date.as_str()))),
            author: reader::non_empty(item.author()),
            creator: dublin_core
                .and_then(|ext| reader::join_names(ext.creators().iter().map(String::as_str))),
        }
    }
}
