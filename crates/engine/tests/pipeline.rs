// ABOUTME: Integration tests for the article pipeline with a small test portal.
// ABOUTME: Covers the blacklist gate, missing roots, body cleaning and error propagation.

use pretty_assertions::assert_eq;
use std::thread;

use tei_engine::{
    fixed_prefix, parse_date, process_html, Byline, DiagnosticLog, Document, Level, MemoryLog,
    MetadataRecord, Outcome, PortalConfig, PortalRules, Result, SelectorRule, TeiError,
};

const RULES: &str = r#"{
    "name": "example",
    "url_prefix": "https://news.example/",
    "article_root": [{"tags": ["div"], "attrs": {"class": "story-body"}}],
    "whitelist": ["p", "h2", "em", "figure"],
    "sources": ["AP", "Reuters"],
    "byline_boilerplate": ["Follow"],
    "decompose": [
        {"tags": ["script"]},
        {"tags": ["div"], "attrs": {"class": "ad"}}
    ],
    "media_tags": ["figure"],
    "link_filter": "tracker\\.example",
    "blacklist": ["https://news.example/skip-me"]
}"#;

fn extract(
    config: &PortalConfig,
    logger: &dyn DiagnosticLog,
    url: &str,
    doc: &Document,
) -> Result<Option<MetadataRecord>> {
    logger.log(Level::Info, &format!("{}: extracting", url));
    let Some(root) = SelectorRule::new(["article"]).find(doc) else {
        logger.warning(&format!("{}: content root not found", url));
        return Ok(None);
    };

    let mut record = MetadataRecord::for_url(url);
    match SelectorRule::new(["h1"]).find_in(&root) {
        Some(h1) => record.name = h1.text().trim().to_string(),
        None => logger.warning(&format!("{}: title not found", url)),
    }
    match SelectorRule::new(["time"]).find_in(&root).and_then(|t| t.attr("datetime")) {
        Some(raw) => {
            record.date_published = Some(parse_date(fixed_prefix(&raw, 19), "%Y-%m-%dT%H:%M:%S")?)
        }
        None => logger.warning(&format!("{}: date not found", url)),
    }
    match SelectorRule::class("span", "byline").find_in(&root) {
        Some(node) => {
            let cleaned = config.byline_cleaner().clean(&node.text());
            if let Some(byline) = Byline::classify(&cleaned, &config.rules().sources) {
                byline.record_into(&mut record);
            }
        }
        None => logger.debug(&format!("{}: byline not found", url)),
    }
    Ok(Some(record))
}

fn portal() -> PortalConfig {
    PortalConfig::new(PortalRules::from_json(RULES).unwrap(), extract).unwrap()
}

fn page(byline: &str, date: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>t</title></head><body>
<article>
  <h1> Test Title </h1>
  <time datetime="{date}">today</time>
  <span class="byline">{byline}</span>
  <div class="story-body" id="body">
    <p class="lead">First <em>paragraph</em> with <a href="/related" target="_blank">a link</a>.</p>
    <script>track()</script>
    <div class="ad"><p>Buy now</p></div>
    <h2 style="x">Sub</h2>
    <a href="https://tracker.example/pixel">pixel</a>
    <figure><img src="/photo.jpg" data-credit="Photographer"></figure>
    <table><tr><td>cell</td></tr></table>
  </div>
</article>
</body></html>"#
    )
}

#[test]
fn blacklisted_url_never_reaches_extractor() {
    let log = MemoryLog::new();
    let outcome = process_html(
        &portal(),
        &log,
        "https://news.example/skip-me",
        &page("AP", "2021-07-04T10:15:30"),
    )
    .unwrap();

    assert!(matches!(outcome, Outcome::Blacklisted));
    assert_eq!(outcome.status(), "blacklisted");
    assert_eq!(log.count(Level::Info), 0, "extractor must not run");
    assert_eq!(log.count(Level::Debug), 1);
}

#[test]
fn missing_content_root_is_not_an_article() {
    let log = MemoryLog::new();
    let url = "https://news.example/world/1";
    let outcome = process_html(&portal(), &log, url, "<html><body><p>hi</p></body></html>").unwrap();

    assert!(matches!(outcome, Outcome::NotArticle));
    let warnings = log.messages(Level::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains(url));
}

#[test]
fn missing_body_container_is_not_an_article() {
    let log = MemoryLog::new();
    let url = "https://news.example/world/2";
    let html = "<html><body><article><h1>T</h1><time datetime=\"2020-01-01T00:00:00\"></time></article></body></html>";
    let outcome = process_html(&portal(), &log, url, html).unwrap();

    assert!(outcome.article().is_none());
    assert!(log
        .messages(Level::Warning)
        .iter()
        .any(|m| m.contains("container") && m.contains(url)));
}

#[test]
fn full_article_is_extracted_and_cleaned() {
    let log = MemoryLog::new();
    let url = "https://news.example/world/3";
    let outcome = process_html(
        &portal(),
        &log,
        url,
        &page("\n  Jane Doe Follow\t", "2021-07-04T10:15:30+02:00"),
    )
    .unwrap();
    let article = outcome.into_article().expect("article");

    let record = &article.record;
    assert_eq!(record.url, url);
    assert_eq!(record.name, "Test Title");
    assert_eq!(record.author, vec!["Jane Doe".to_string()]);
    assert!(record.source.is_empty());
    assert_eq!(
        record.date_published.map(|d| d.to_string()).as_deref(),
        Some("2021-07-04 10:15:30")
    );
    assert_eq!(log.count(Level::Warning), 0);

    let body = &article.body;
    assert!(body.contains("First"));
    assert!(body.contains("cell"));
    assert!(!body.contains("track()"));
    assert!(!body.contains("Buy now"));
    assert!(!body.contains("class="));
    assert!(!body.contains("href="));
    assert!(body.contains("<else>"));
    assert!(body.contains("<p>"));
    assert!(body.contains("<h2>"));

    let hrefs: Vec<&str> = article.links.iter().filter_map(|l| l.get("href")).collect();
    assert_eq!(hrefs, vec!["/related"]);
    let img = article.links.iter().find(|l| l.tag == "img").expect("img link");
    // The image sits under a media tag, so its extra attributes survive normalization.
    assert_eq!(img.get("data-credit"), Some("Photographer"));
    assert_eq!(article.next_page, None);
}

#[test]
fn agency_byline_goes_to_source() {
    let log = MemoryLog::new();
    let outcome = process_html(
        &portal(),
        &log,
        "https://news.example/world/4",
        &page("Reuters", "2021-07-04T10:15:30"),
    )
    .unwrap();
    let article = outcome.into_article().unwrap();
    assert_eq!(article.record.source, vec!["Reuters".to_string()]);
    assert!(article.record.author.is_empty());
}

#[test]
fn malformed_date_propagates() {
    let log = MemoryLog::new();
    let err = process_html(
        &portal(),
        &log,
        "https://news.example/world/5",
        &page("AP", "yesterday"),
    )
    .unwrap_err();
    assert!(err.is_date_format());
}

#[test]
fn invalid_url_is_rejected() {
    let log = MemoryLog::new();
    let err = process_html(&portal(), &log, "not a url", &page("AP", "2021-07-04T10:15:30"))
        .unwrap_err();
    assert!(matches!(err, TeiError::InvalidUrl(_)));
}

#[test]
fn independent_articles_process_concurrently() {
    let config = portal();
    let log = MemoryLog::new();
    thread::scope(|s| {
        for i in 0..4 {
            let config = &config;
            let log = &log;
            s.spawn(move || {
                let url = format!("https://news.example/world/t{}", i);
                let html = page("AP", "2021-07-04T10:15:30");
                let outcome = process_html(config, log, &url, &html).unwrap();
                assert_eq!(outcome.article().unwrap().record.url, url);
            });
        }
    });
    assert_eq!(log.count(Level::Info), 4);
}
