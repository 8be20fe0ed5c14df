//! Document model

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;

use super::FrontMatter;

/// One parsed content document.
///
/// Constructed once per load from its source file and immutable afterwards;
/// a reload produces fresh documents rather than mutating old ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Source file path relative to the source dir; unique within one load
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Document title
    pub title: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Whether the document is a draft
    pub draft: bool,

    /// Whether the renderer should enable math typesetting
    pub math: bool,

    /// Body text following the front-matter block, opaque to this crate
    pub body: String,

    /// Front-matter fields not recognized by the parser
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Document {
    /// Build a document from its validated front matter and body
    pub fn new(source: String, full_source: PathBuf, front: FrontMatter, body: &str) -> Self {
        Self {
            source,
            full_source,
            title: front.title,
            date: front.date,
            draft: front.draft,
            math: front.math,
            body: body.to_string(),
            extra: front.extra,
        }
    }

    /// Collection ordering: date descending, source path ascending on ties
    pub fn collection_cmp(&self, other: &Document) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| self.source.cmp(&other.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str, date: &str) -> Document {
        Document {
            source: source.to_string(),
            full_source: PathBuf::from(source),
            title: source.to_string(),
            date: DateTime::parse_from_rfc3339(date).unwrap(),
            draft: false,
            math: false,
            body: String::new(),
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn test_newer_sorts_first() {
        let a = doc("a.md", "2020-08-24T00:00:00+00:00");
        let b = doc("b.md", "2020-08-25T00:00:00+00:00");
        assert_eq!(a.collection_cmp(&b), Ordering::Greater);
        assert_eq!(b.collection_cmp(&a), Ordering::Less);
    }

    #[test]
    fn test_date_tie_breaks_on_source() {
        let a = doc("a.md", "2020-08-24T00:00:00+00:00");
        let b = doc("b.md", "2020-08-24T00:00:00+00:00");
        assert_eq!(a.collection_cmp(&b), Ordering::Less);
    }
}
