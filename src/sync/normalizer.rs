//! Coerces raw feed entries into the stored issue shape.
//!
//! Every field has a fallback, so normalization never fails. The lead image
//! and the snippet come from regex scans of the content, not an HTML parse.

use crate::db;
use crate::db::issues::NewIssue;
use crate::sync::reader::RawFeedEntry;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const SNIPPET_MAX_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

static IMG_SRC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img\b[^>]*?\ssrc=["']([^"'>]+)["']"#).unwrap());
static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds an issue from `entry`; `newsletter_id` is left empty for the caller.
pub fn normalize(entry: &RawFeedEntry, feed_title: Option<&str>) -> NewIssue {
    let content = entry
        .content
        .as_deref()
        .or(entry.description.as_deref())
        .unwrap_or_default()
        .to_string();

    let author = entry
        .author
        .as_deref()
        .or(entry.creator.as_deref())
        .or(feed_title)
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_string();

    let published_at = parse_time(entry.pub_date.as_deref())
        .or_else(|| parse_time(entry.published.as_deref()))
        .unwrap_or_else(db::current_time);

    NewIssue {
        newsletter_id: String::new(),
        title: entry.title.as_deref().unwrap_or(UNTITLED).to_string(),
        url: entry.link.clone().unwrap_or_default(),
        author,
        published_at,
        image_url: extract_image(&content),
        snippet: create_snippet(&content),
        content,
    }
}

/// `src` of the first `<img>` tag in document order, or an empty string.
pub fn extract_image(content: &str) -> String {
    IMG_SRC_REGEX
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|src| src.as_str().to_string())
        .unwrap_or_default()
}

/// Tag-stripped, trimmed text cut to `SNIPPET_MAX_CHARS` characters.
pub fn create_snippet(content: &str) -> String {
    let plain_text = HTML_TAG_REGEX.replace_all(content, "");
    let plain_text = plain_text.trim();

    match plain_text.char_indices().nth(SNIPPET_MAX_CHARS) {
        None => plain_text.to_string(),
        Some((idx, _)) => {
            let mut snippet = String::from(&plain_text[..idx]);

            snippet.push_str(ELLIPSIS);

            snippet
        }
    }
}

fn parse_time(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();

    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.into());
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.into());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, NAIVE_DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|date| date.and_utc());
    }

    log::debug!("Unrecognized publication date {value:?}");

    None
}
