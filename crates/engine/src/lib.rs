// ABOUTME: Library entry point for the portal-configured HTML-to-TEI extraction engine.
// ABOUTME: Re-exports the pipeline, portal configuration, record, logger and body cleaning stages.

//! TEI extraction engine.
//!
//! News portals plug into this engine as configuration values: selector rules
//! for the article container, a tag whitelist, a source list for byline
//! disambiguation, subtree removal rules, a URL blacklist and a metadata
//! extractor function. The engine runs the extractor, cleans the article body
//! in place and returns a [`MetadataRecord`] plus the cleaned body for a
//! downstream TEI emitter.
//!
//! # Example
//!
//! ```no_run
//! use tei_engine::{process_html, MemoryLog, Outcome, PortalConfig};
//!
//! # fn run(portal: &PortalConfig, html: &str) -> tei_engine::Result<()> {
//! let log = MemoryLog::new();
//! match process_html(portal, &log, "https://hvg.hu/itthon/20210704_cikk", html)? {
//!     Outcome::Article(article) => println!("{}", article.record.name),
//!     Outcome::NotArticle => eprintln!("no article on page"),
//!     Outcome::Blacklisted => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod byline;
pub mod config;
pub mod date;
pub mod dom;
pub mod error;
pub mod log;
pub mod pipeline;
pub mod record;
pub mod registry;
pub mod select;

pub use crate::byline::{Byline, BylineCleaner};
pub use crate::config::{no_next_page, MetaExtractor, NextPageFn, PortalConfig, PortalRules};
pub use crate::date::{fixed_prefix, parse_date, Timestamp};
pub use crate::dom::{ArticleTree, LinkTarget, GENERIC_TAG};
pub use crate::error::{Result, TeiError};
pub use crate::log::{DiagnosticLog, Level, LogEntry, MemoryLog, TracingLog};
pub use crate::pipeline::{process_document, process_html, Outcome, ProcessedArticle};
pub use crate::record::{MetadataRecord, RecordKey, RecordValue};
pub use crate::registry::PortalRegistry;
pub use crate::select::SelectorRule;

/// Re-exported so portal crates parse documents with the same DOM version.
pub use dom_query::{Document, NodeRef};
