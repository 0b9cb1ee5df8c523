// ABOUTME: hvg.hu portal: embedded selector rules plus the metadata extractor for its article pages.
// ABOUTME: Reads date, title, byline, tags and section; missing fields are logged, bad dates propagate.

use once_cell::sync::Lazy;

use tei_engine::{
    fixed_prefix, parse_date, Byline, DiagnosticLog, Document, MetadataRecord, NodeRef,
    PortalConfig, PortalRules, Result, SelectorRule,
};

/// Embedded rule file for hvg.hu.
const HVG_RULES_JSON: &str = include_str!("../data/hvg.json");

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_WIDTH: usize = 19;

static CONTENT_ROOT: Lazy<SelectorRule> = Lazy::new(|| SelectorRule::class("div", "article-content"));
static PUBLISHED: Lazy<SelectorRule> = Lazy::new(|| SelectorRule::class("time", "article-datetime"));
static MODIFIED: Lazy<SelectorRule> = Lazy::new(|| SelectorRule::class("time", "lastdate"));
static TITLE_BOX: Lazy<SelectorRule> =
    Lazy::new(|| SelectorRule::class("div", "article-title article-title"));
static AUTHOR: Lazy<SelectorRule> = Lazy::new(|| SelectorRule::class("div", "author-name"));
static TAGS: Lazy<SelectorRule> = Lazy::new(|| SelectorRule::class("div", "article-tags"));
static INFO: Lazy<SelectorRule> = Lazy::new(|| SelectorRule::class("div", "info"));
static H1: Lazy<SelectorRule> = Lazy::new(|| SelectorRule::new(["h1"]));
static LINK: Lazy<SelectorRule> = Lazy::new(|| SelectorRule::new(["a"]));

/// Parses the embedded hvg.hu rules.
pub fn rules() -> Result<PortalRules> {
    PortalRules::from_json(HVG_RULES_JSON)
}

/// The ready-to-use hvg.hu portal. Articles are never split over pages.
pub fn portal() -> Result<PortalConfig> {
    PortalConfig::new(rules()?, extract_meta)
}

/// Metadata extractor for hvg.hu article pages.
///
/// Returns `Ok(None)` when the page has no `div.article-content`. A present
/// modification date replaces the publication date.
pub fn extract_meta(
    config: &PortalConfig,
    logger: &dyn DiagnosticLog,
    url: &str,
    doc: &Document,
) -> Result<Option<MetadataRecord>> {
    let Some(root) = CONTENT_ROOT.find(doc) else {
        logger.warning(&format!("{}: article body not found", url));
        return Ok(None);
    };
    let mut record = MetadataRecord::for_url(url);

    match datetime_of(PUBLISHED.find(doc)) {
        Some(raw) => record.date_published = Some(parse_date(fixed_prefix(&raw, DATE_WIDTH), DATE_FORMAT)?),
        None => logger.warning(&format!("{}: date tag not found", url)),
    }
    match datetime_of(MODIFIED.find(doc)) {
        Some(raw) => record.date_published = Some(parse_date(fixed_prefix(&raw, DATE_WIDTH), DATE_FORMAT)?),
        None => logger.debug(&format!("{}: modified date tag not found", url)),
    }

    match TITLE_BOX.find_in(&root).and_then(|title| H1.find_in(&title)) {
        Some(h1) => record.name = h1.text().trim().to_string(),
        None => logger.warning(&format!("{}: title tag not found", url)),
    }

    match AUTHOR.find_in(&root) {
        Some(byline) => {
            let cleaned = config.byline_cleaner().clean(&byline.text());
            match Byline::classify(&cleaned, &config.rules().sources) {
                Some(byline) => byline.record_into(&mut record),
                None => logger.warning(&format!("{}: author / source tag empty", url)),
            }
        }
        None => logger.warning(&format!("{}: author / source tag not found", url)),
    }

    match TAGS.find_in(&root) {
        Some(tags) => {
            record.keywords = LINK
                .find_all_in(&tags)
                .iter()
                .map(|a| a.text().trim().to_string())
                .collect();
        }
        None => logger.debug(&format!("{}: tags not found", url)),
    }

    match INFO.find(doc) {
        Some(info) => match LINK.find_in(&info) {
            Some(section) => record.article_section = section.text().trim().to_string(),
            None => logger.warning(&format!("{}: section tag not found", url)),
        },
        None => logger.debug(&format!("{}: info box not found", url)),
    }

    Ok(Some(record))
}

fn datetime_of(node: Option<NodeRef<'_>>) -> Option<String> {
    node?.attr("datetime").map(|value| value.to_string())
}
