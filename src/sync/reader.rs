use self::atom::AtomReader;
use self::json::JsonReader;
use self::rss::RssReader;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use typed_builder::TypedBuilder as Builder;

pub mod atom;
pub mod json;
pub mod rss;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{msg}")]
pub struct ParseError {
    pub msg: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Rss,
    Atom,
    Json,
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedType::Rss => "rss",
            FeedType::Atom => "atom",
            FeedType::Json => "json",
        };

        write!(f, "{name}")
    }
}

/// One feed item exactly as the document exposes it. Missing or empty
/// fields are `None`; fallbacks are applied by the normalizer.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeedEntry {
    #[builder(setter(into, strip_option), default)]
    pub title: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub content: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub description: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub link: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub pub_date: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub published: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub author: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub creator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeed {
    pub title: Option<String>,
    pub feed_type: FeedType,
    pub entries: Vec<RawFeedEntry>,
}

pub trait ReadFeed {
    fn read_from_bytes(&self, data: &[u8]) -> Result<RawFeed, ParseError>;
}

/// Parses a syndication document, trying RSS, Atom and JSON Feed in turn.
pub fn parse(data: &[u8]) -> Result<RawFeed, ParseError> {
    let readers: [&dyn ReadFeed; 3] = [&RssReader, &AtomReader, &JsonReader];
    let mut errors = Vec::with_capacity(readers.len());

    for reader in readers {
        match reader.read_from_bytes(data) {
            Ok(feed) => return Ok(feed),
            Err(error) => errors.push(error.msg),
        }
    }

    Err(ParseError {
        msg: format!("Content is not a feed: {}", errors.join("; ")),
    })
}

pub fn detect_feed_type(data: &[u8]) -> Result<FeedType, ParseError> {
    parse(data).map(|feed| feed.feed_type)
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.to_string())
}

pub(crate) fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let names = names
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect::<Vec<&str>>();

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}
