// ABOUTME: Byline cleanup and source/author disambiguation.
// ABOUTME: Strips control characters and portal boilerplate, then classifies against a source list.

use std::collections::HashSet;

use aho_corasick::{AhoCorasick, MatchKind};

use crate::error::{Result, TeiError};
use crate::record::MetadataRecord;

/// Removes layout noise from raw byline text.
///
/// Cleaning trims, drops `\r`, `\n` and `\t` (without inserting spaces),
/// removes every boilerplate phrase, then trims again.
#[derive(Debug, Clone)]
pub struct BylineCleaner {
    boilerplate: Option<AhoCorasick>,
}

impl BylineCleaner {
    /// Builds a cleaner for the given boilerplate phrases. Empty phrases are ignored.
    pub fn new<S: AsRef<str>>(boilerplate: &[S]) -> Result<Self> {
        let phrases: Vec<&str> = boilerplate
            .iter()
            .map(AsRef::as_ref)
            .filter(|p| !p.is_empty())
            .collect();
        if phrases.is_empty() {
            return Ok(Self { boilerplate: None });
        }
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&phrases)
            .map_err(TeiError::config)?;
        Ok(Self {
            boilerplate: Some(matcher),
        })
    }

    pub fn clean(&self, raw: &str) -> String {
        let without_controls: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
            .collect();
        let stripped = match &self.boilerplate {
            Some(matcher) => {
                let empty = vec![""; matcher.patterns_len()];
                matcher.replace_all(&without_controls, &empty)
            }
            None => without_controls,
        };
        stripped.trim().to_string()
    }
}

/// Who a byline names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Byline {
    /// A news agency, partner site or other non-person source.
    Source(String),
    /// A person.
    Author(String),
}

impl Byline {
    /// Exact, case-sensitive membership test of the cleaned text.
    ///
    /// Returns `None` when nothing is left of the byline after cleaning.
    pub fn classify(cleaned: &str, sources: &HashSet<String>) -> Option<Self> {
        if cleaned.is_empty() {
            return None;
        }
        Some(if sources.contains(cleaned) {
            Byline::Source(cleaned.to_string())
        } else {
            Byline::Author(cleaned.to_string())
        })
    }

    /// Appends the byline to the matching record field.
    pub fn record_into(self, record: &mut MetadataRecord) {
        match self {
            Byline::Source(s) => record.source.push(s),
            Byline::Author(a) => record.author.push(a),
        }
    }
}
