// ABOUTME: Link attribute normalizer for anchor and media elements in the article tree.
// ABOUTME: Keeps only meaningful link attributes and collects link targets before classification.

use std::collections::BTreeMap;

use dom_query::NodeRef;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::tree::ArticleTree;

/// Tags that carry links or embedded media.
pub const BASIC_LINK_TAGS: &[&str] = &["a", "img", "iframe"];

/// Attributes worth keeping on link and media tags.
pub const BASIC_LINK_ATTRS: &[&str] = &["href", "src", "alt"];

fn is_link_tag(node: &NodeRef, link_tags: &[String]) -> bool {
    node.node_name()
        .map(|name| link_tags.iter().any(|t| t.eq_ignore_ascii_case(&name)))
        .unwrap_or(false)
}

/// Strips every attribute outside `allowed_attrs` from link and media
/// elements. Protected nodes and non-link elements are left alone.
///
/// Returns the number of attributes removed.
pub fn normalize_links(
    tree: &mut ArticleTree,
    link_tags: &[String],
    allowed_attrs: &[String],
) -> usize {
    let mut stripped = 0;
    for node in tree.elements() {
        if tree.is_protected(&node.id) || !is_link_tag(&node, link_tags) {
            continue;
        }
        let doomed: Vec<String> = node
            .attrs()
            .iter()
            .map(|attr| attr.name.local.to_string())
            .filter(|name| !allowed_attrs.iter().any(|a| a.eq_ignore_ascii_case(name)))
            .collect();
        for name in &doomed {
            node.remove_attr(name);
        }
        stripped += doomed.len();
    }
    tracing::debug!(stripped, "normalized link attributes");
    stripped
}

/// A link or media reference found in the article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
}

impl LinkTarget {
    pub fn get(&self, attr: &str) -> Option<&str> {
        self.attrs.get(attr).map(String::as_str)
    }
}

/// Collects link and media elements that still carry attributes, in document
/// order. Targets with any attribute value matching `filter` are dropped.
pub fn collect_links(
    tree: &ArticleTree,
    link_tags: &[String],
    filter: Option<&Regex>,
) -> Vec<LinkTarget> {
    tree.elements()
        .iter()
        .filter(|node| is_link_tag(node, link_tags))
        .filter_map(|node| {
            let attrs: BTreeMap<String, String> = node
                .attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            if attrs.is_empty() {
                return None;
            }
            if let Some(re) = filter {
                if attrs.values().any(|v| re.is_match(v)) {
                    return None;
                }
            }
            Some(LinkTarget {
                tag: node.node_name().map(|n| n.to_string()).unwrap_or_default(),
                attrs,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::decompose::decompose;
    use crate::select::SelectorRule;
    use pretty_assertions::assert_eq;

    const HTML: &str = r#"
        <html><body>
            <div class="article-main">
                <p class="lead">Read <a href="/next" target="_blank" rel="noopener" class="btn">next</a></p>
                <img src="/pic.jpg" alt="Pic" width="300" loading="lazy">
                <iframe src="https://video.example/embed/1" allowfullscreen frameborder="0"></iframe>
                <figure><a href="/big.jpg" data-gallery="g1"><img src="/thumb.jpg" data-src="/thumb@2x.jpg"></a></figure>
                <a href="https://ads.example/click?id=1">sponsored</a>
                <a>bare</a>
            </div>
        </body></html>
    "#;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn tree() -> ArticleTree {
        ArticleTree::from_html(HTML, &[SelectorRule::class("div", "article-main")]).unwrap()
    }

    #[test]
    fn strips_all_but_allowed_attributes() {
        let mut tree = tree();
        normalize_links(&mut tree, &strings(BASIC_LINK_TAGS), &strings(BASIC_LINK_ATTRS));

        let root = tree.root();
        let anchor = SelectorRule::new(["a"]).find_in(&root).unwrap();
        let names: Vec<String> = anchor
            .attrs()
            .iter()
            .map(|a| a.name.local.to_string())
            .collect();
        assert_eq!(names, vec!["href"]);

        let img = SelectorRule::new(["img"]).find_in(&root).unwrap();
        assert_eq!(img.attr("src").as_deref(), Some("/pic.jpg"));
        assert_eq!(img.attr("alt").as_deref(), Some("Pic"));
        assert!(img.attr("width").is_none());

        let iframe = SelectorRule::new(["iframe"]).find_in(&root).unwrap();
        assert_eq!(iframe.attrs().len(), 1);
    }

    #[test]
    fn non_link_elements_are_untouched() {
        let mut tree = tree();
        normalize_links(&mut tree, &strings(BASIC_LINK_TAGS), &strings(BASIC_LINK_ATTRS));
        let p = SelectorRule::new(["p"]).find_in(&tree.root()).unwrap();
        assert_eq!(p.attr("class").as_deref(), Some("lead"));
    }

    #[test]
    fn protected_media_descendants_keep_attributes() {
        let mut tree = tree();
        decompose(&mut tree, &[], &strings(&["figure"]));
        normalize_links(&mut tree, &strings(BASIC_LINK_TAGS), &strings(BASIC_LINK_ATTRS));

        let root = tree.root();
        let figure = SelectorRule::new(["figure"]).find_in(&root).unwrap();
        let inner_anchor = SelectorRule::new(["a"]).find_in(&figure).unwrap();
        let inner_img = SelectorRule::new(["img"]).find_in(&figure).unwrap();
        assert_eq!(inner_anchor.attr("data-gallery").as_deref(), Some("g1"));
        assert_eq!(inner_img.attr("data-src").as_deref(), Some("/thumb@2x.jpg"));
    }

    #[test]
    fn collects_targets_in_document_order() {
        let mut tree = tree();
        normalize_links(&mut tree, &strings(BASIC_LINK_TAGS), &strings(BASIC_LINK_ATTRS));
        let links = collect_links(&tree, &strings(BASIC_LINK_TAGS), None);

        let tags: Vec<&str> = links.iter().map(|l| l.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "img", "iframe", "a", "img", "a"]);
        assert_eq!(links[0].get("href"), Some("/next"));
        assert_eq!(links[2].get("src"), Some("https://video.example/embed/1"));
        // The bare anchor carries nothing to link to.
        assert!(links.iter().all(|l| !l.attrs.is_empty()));
    }

    #[test]
    fn filter_drops_matching_targets() {
        let tree = tree();
        let filter = Regex::new(r"ads\.example|/thumb").unwrap();
        let links = collect_links(&tree, &strings(&["a", "img"]), Some(&filter));
        assert!(links
            .iter()
            .all(|l| l.attrs.values().all(|v| !filter.is_match(v))));
        assert_eq!(links.len(), 3);
    }
}
