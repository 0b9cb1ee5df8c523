// ABOUTME: Fixed-schema metadata record assembled by portal extractors.
// ABOUTME: Every recognized schema.org key always has a value; unset keys hold neutral defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::Timestamp;

/// Recognized schema keys, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Url,
    Name,
    Author,
    Source,
    DatePublished,
    Keywords,
    ArticleSection,
}

impl RecordKey {
    /// All keys in the order emitters write them.
    pub const ALL: [RecordKey; 7] = [
        RecordKey::Url,
        RecordKey::Name,
        RecordKey::Author,
        RecordKey::Source,
        RecordKey::DatePublished,
        RecordKey::Keywords,
        RecordKey::ArticleSection,
    ];

    /// The schema.org name with the `sch:` prefix used by the TEI header.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Url => "sch:url",
            RecordKey::Name => "sch:name",
            RecordKey::Author => "sch:author",
            RecordKey::Source => "sch:source",
            RecordKey::DatePublished => "sch:datePublished",
            RecordKey::Keywords => "sch:keywords",
            RecordKey::ArticleSection => "sch:articleSection",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view of one record value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordValue<'a> {
    Text(&'a str),
    Timestamp(Option<&'a Timestamp>),
    List(&'a [String]),
}

impl RecordValue<'_> {
    /// True when the value is still the neutral default.
    pub fn is_empty(&self) -> bool {
        match self {
            RecordValue::Text(s) => s.is_empty(),
            RecordValue::Timestamp(ts) => ts.is_none(),
            RecordValue::List(items) => items.is_empty(),
        }
    }
}

/// Article metadata produced by one extractor invocation.
///
/// Built additively field by field, then handed to the pipeline as a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub url: String,
    pub name: String,
    pub author: Vec<String>,
    pub source: Vec<String>,
    pub date_published: Option<Timestamp>,
    pub keywords: Vec<String>,
    pub article_section: String,
}

impl MetadataRecord {
    /// Creates an empty record for `url`.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Looks up a value by schema key. Never fails.
    pub fn get(&self, key: RecordKey) -> RecordValue<'_> {
        match key {
            RecordKey::Url => RecordValue::Text(&self.url),
            RecordKey::Name => RecordValue::Text(&self.name),
            RecordKey::Author => RecordValue::List(&self.author),
            RecordKey::Source => RecordValue::List(&self.source),
            RecordKey::DatePublished => RecordValue::Timestamp(self.date_published.as_ref()),
            RecordKey::Keywords => RecordValue::List(&self.keywords),
            RecordKey::ArticleSection => RecordValue::Text(&self.article_section),
        }
    }

    /// Every recognized key with its current value, in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (RecordKey, RecordValue<'_>)> + '_ {
        RecordKey::ALL.iter().map(move |key| (*key, self.get(*key)))
    }
}
