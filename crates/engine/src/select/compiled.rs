// ABOUTME: Process-wide cache of compiled tag matchers keyed by a rule's normalized tag set.
// ABOUTME: Rules naming the same tags share one Matcher; tag sets CSS cannot express cache as None.

//! Matcher caching for rule lookups.
//!
//! A [`SelectorRule`] narrows candidates with a CSS matcher built from its tag
//! set and then checks its attribute predicate node by node. Only the tag set
//! reaches CSS, so rules that differ in attributes, tag order or tag case all
//! share one compiled matcher.

use std::collections::HashMap;
use std::sync::RwLock;

use dom_query::Matcher;
use once_cell::sync::Lazy;

use super::rule::SelectorRule;

static TAG_MATCHERS: Lazy<RwLock<HashMap<TagKey, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// A rule's tag set: lowercased, sorted, deduplicated. Empty means any element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TagKey(Vec<String>);

impl TagKey {
    fn of(rule: &SelectorRule) -> Self {
        let mut tags: Vec<String> = rule.tags.iter().map(|t| t.to_ascii_lowercase()).collect();
        tags.sort_unstable();
        tags.dedup();
        TagKey(tags)
    }

    fn css(&self) -> String {
        if self.0.is_empty() {
            "*".to_string()
        } else {
            self.0.join(", ")
        }
    }

    fn compile(&self) -> Option<Matcher> {
        Matcher::new(&self.css()).ok()
    }
}

/// The candidate matcher for `rule`, compiled on first use.
///
/// `None` when the tag names are not valid CSS; callers then walk the subtree.
pub fn matcher_for(rule: &SelectorRule) -> Option<Matcher> {
    let key = TagKey::of(rule);
    if let Some(cached) = TAG_MATCHERS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(&key)
    {
        return cached.clone();
    }

    TAG_MATCHERS
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .entry(key)
        .or_insert_with_key(TagKey::compile)
        .clone()
}

/// Compiles the matchers of a portal's rules when the portal is loaded.
pub fn precompile_rules<'a, I>(rules: I)
where
    I: IntoIterator<Item = &'a SelectorRule>,
{
    let mut cache = TAG_MATCHERS.write().unwrap_or_else(|e| e.into_inner());
    for rule in rules {
        cache
            .entry(TagKey::of(rule))
            .or_insert_with_key(TagKey::compile);
    }
}
