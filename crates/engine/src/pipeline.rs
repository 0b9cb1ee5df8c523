// ABOUTME: Per-article pipeline: blacklist gate, metadata extraction and body cleaning.
// ABOUTME: Owns the parsed document for one article and threads it through every stage.

//! Article processing.
//!
//! One call handles one article synchronously:
//!
//! 1. the URL is validated and checked against the portal blacklist;
//! 2. the portal's metadata extractor runs on the whole document;
//! 3. the article container is located and cleaned in place
//!    (decompose → normalize links → collect links → classify);
//! 4. the next-page URL is asked for.
//!
//! Calls share nothing but the read-only [`PortalConfig`] and the logger, so
//! independent articles can be processed on separate threads.

use dom_query::Document;
use serde::Serialize;
use url::Url;

use crate::config::PortalConfig;
use crate::dom::{classify, collect_links, decompose, normalize_links, ArticleTree, LinkTarget};
use crate::error::{Result, TeiError};
use crate::log::DiagnosticLog;
use crate::record::MetadataRecord;

/// A fully processed article.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedArticle {
    pub record: MetadataRecord,
    /// Cleaned outer HTML of the article container.
    pub body: String,
    pub links: Vec<LinkTarget>,
    pub next_page: Option<String>,
}

/// What became of one page.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The URL is on the portal blacklist; nothing was extracted.
    Blacklisted,
    /// No article content root or body container on the page.
    NotArticle,
    Article(Box<ProcessedArticle>),
}

impl Outcome {
    /// Short status label.
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Blacklisted => "blacklisted",
            Outcome::NotArticle => "not_article",
            Outcome::Article(_) => "article",
        }
    }

    pub fn article(&self) -> Option<&ProcessedArticle> {
        match self {
            Outcome::Article(article) => Some(article),
            _ => None,
        }
    }

    pub fn into_article(self) -> Option<ProcessedArticle> {
        match self {
            Outcome::Article(article) => Some(*article),
            _ => None,
        }
    }
}

/// Parses `html` and runs [`process_document`].
pub fn process_html(
    config: &PortalConfig,
    logger: &dyn DiagnosticLog,
    url: &str,
    html: &str,
) -> Result<Outcome> {
    process_document(config, logger, url, Document::from(html))
}

/// Runs the full pipeline over an already parsed page.
///
/// Only a missing root changes the shape of the result; missing optional
/// fields are logged by the extractor. Date format errors propagate.
pub fn process_document(
    config: &PortalConfig,
    logger: &dyn DiagnosticLog,
    url: &str,
    doc: Document,
) -> Result<Outcome> {
    Url::parse(url).map_err(|e| TeiError::InvalidUrl(format!("{}: {}", url, e)))?;

    if config.is_blacklisted(url) {
        logger.debug(&format!("{}: blacklisted, skipping", url));
        return Ok(Outcome::Blacklisted);
    }

    let Some(record) = config.extract(logger, url, &doc)? else {
        return Ok(Outcome::NotArticle);
    };
    let next_page = config.next_page(url, &doc);

    let rules = config.rules();
    let Some(mut tree) = ArticleTree::locate(doc, &rules.article_root) else {
        logger.warning(&format!("{}: article body container not found", url));
        return Ok(Outcome::NotArticle);
    };
    let links = clean_body(config, &mut tree);

    tracing::debug!(portal = config.name(), url, links = links.len(), "processed article");
    Ok(Outcome::Article(Box::new(ProcessedArticle {
        record,
        body: tree.html(),
        links,
        next_page,
    })))
}

/// Cleans the article container in place and returns its link targets.
pub fn clean_body(config: &PortalConfig, tree: &mut ArticleTree) -> Vec<LinkTarget> {
    let rules = config.rules();
    decompose(tree, &rules.decompose, &rules.media_tags);
    normalize_links(tree, &rules.link_tags, &rules.link_attrs);
    let links = collect_links(tree, &rules.link_tags, config.link_filter());
    classify(tree, &rules.whitelist);
    links
}
