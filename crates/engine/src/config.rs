// ABOUTME: Per-portal configuration: declarative rules plus the portal's extractor functions.
// ABOUTME: Rules deserialize from JSON; PortalConfig compiles them once and is shared read-only.

//! Portal configuration.
//!
//! A portal is a value, not a subtype. [`PortalRules`] holds everything that
//! is pure data (selectors, tag lists, the source list, the blacklist) and is
//! usually loaded from an embedded JSON file. [`PortalConfig`] pairs the rules
//! with the portal's metadata extractor and next-page functions and keeps the
//! compiled forms of the rules that need compiling.

use std::collections::HashSet;
use std::fmt;

use dom_query::Document;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::byline::BylineCleaner;
use crate::dom::{BASIC_LINK_ATTRS, BASIC_LINK_TAGS};
use crate::error::{Result, TeiError};
use crate::log::DiagnosticLog;
use crate::record::MetadataRecord;
use crate::select::{precompile_rules, SelectorRule};

/// Builds the metadata record for one page.
///
/// Returns `Ok(None)` when the page has no article content root. Missing
/// optional fields are logged to the sink and left at their defaults; date
/// format errors propagate.
pub type MetaExtractor =
    fn(&PortalConfig, &dyn DiagnosticLog, &str, &Document) -> Result<Option<MetadataRecord>>;

/// Returns the URL of the next page of a multi-page article.
pub type NextPageFn = fn(&str, &Document) -> Option<String>;

/// Next-page function for portals that never split articles.
pub fn no_next_page(_url: &str, _doc: &Document) -> Option<String> {
    None
}

fn basic_link_tags() -> Vec<String> {
    BASIC_LINK_TAGS.iter().map(|s| s.to_string()).collect()
}

fn basic_link_attrs() -> Vec<String> {
    BASIC_LINK_ATTRS.iter().map(|s| s.to_string()).collect()
}

/// The declarative part of a portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalRules {
    /// Short portal identifier, e.g. `hvg`.
    pub name: String,
    /// Every article URL of the portal starts with this.
    pub url_prefix: String,
    /// Rules locating the article body container; the first rule with a match wins.
    #[serde(default)]
    pub article_root: Vec<SelectorRule>,
    /// Tag names that survive classification.
    #[serde(default)]
    pub whitelist: HashSet<String>,
    /// Bylines naming agencies or partner sites rather than people.
    #[serde(default)]
    pub sources: HashSet<String>,
    /// Phrases stripped from byline text before classification.
    #[serde(default)]
    pub byline_boilerplate: Vec<String>,
    /// Subtrees removed from the body, applied in order.
    #[serde(default)]
    pub decompose: Vec<SelectorRule>,
    /// Elements whose descendants keep their attributes.
    #[serde(default)]
    pub media_tags: Vec<String>,
    #[serde(default = "basic_link_tags")]
    pub link_tags: Vec<String>,
    #[serde(default = "basic_link_attrs")]
    pub link_attrs: Vec<String>,
    /// Regex; link targets with a matching attribute value are dropped.
    #[serde(default)]
    pub link_filter: Option<String>,
    /// URLs that are never extracted.
    #[serde(default)]
    pub blacklist: HashSet<String>,
}

impl PortalRules {
    /// Parses rules from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(TeiError::config)
    }

    pub fn is_blacklisted(&self, url: &str) -> bool {
        self.blacklist.contains(url)
    }

    /// True when `url` belongs to this portal.
    pub fn owns_url(&self, url: &str) -> bool {
        !self.url_prefix.is_empty() && url.starts_with(&self.url_prefix)
    }
}

/// A ready-to-use portal: rules, compiled helpers and extractor functions.
#[derive(Clone)]
pub struct PortalConfig {
    rules: PortalRules,
    byline: BylineCleaner,
    link_filter: Option<Regex>,
    extract_meta: MetaExtractor,
    next_page: NextPageFn,
}

impl fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalConfig")
            .field("rules", &self.rules)
            .field("link_filter", &self.link_filter)
            .finish_non_exhaustive()
    }
}

impl PortalConfig {
    /// Compiles `rules` and pairs them with the portal's extractor.
    pub fn new(rules: PortalRules, extract_meta: MetaExtractor) -> Result<Self> {
        let byline = BylineCleaner::new(rules.byline_boilerplate.as_slice())?;
        let link_filter = rules
            .link_filter
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(TeiError::config)?;
        precompile_rules(rules.article_root.iter().chain(rules.decompose.iter()));
        Ok(Self {
            rules,
            byline,
            link_filter,
            extract_meta,
            next_page: no_next_page,
        })
    }

    /// Replaces the default next-page function.
    pub fn with_next_page(mut self, next_page: NextPageFn) -> Self {
        self.next_page = next_page;
        self
    }

    pub fn name(&self) -> &str {
        &self.rules.name
    }

    pub fn rules(&self) -> &PortalRules {
        &self.rules
    }

    pub fn byline_cleaner(&self) -> &BylineCleaner {
        &self.byline
    }

    pub fn link_filter(&self) -> Option<&Regex> {
        self.link_filter.as_ref()
    }

    pub fn is_blacklisted(&self, url: &str) -> bool {
        self.rules.is_blacklisted(url)
    }

    /// Runs the portal's metadata extractor.
    pub fn extract(
        &self,
        logger: &dyn DiagnosticLog,
        url: &str,
        doc: &Document,
    ) -> Result<Option<MetadataRecord>> {
        (self.extract_meta)(self, logger, url, doc)
    }

    /// Runs the portal's next-page function.
    pub fn next_page(&self, url: &str, doc: &Document) -> Option<String> {
        (self.next_page)(url, doc)
    }
}
