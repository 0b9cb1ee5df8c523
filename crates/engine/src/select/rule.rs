// ABOUTME: Declarative (tag-set, attribute-predicate) rules used to find and remove elements.
// ABOUTME: The same rule type locates article roots, metadata fields and subtrees to decompose.

use std::collections::BTreeMap;

use dom_query::{Document, NodeRef, Selection};
use serde::{Deserialize, Serialize};

use super::compiled::matcher_for;

/// Attributes whose value is a whitespace-separated token list.
const MULTI_VALUED_ATTRS: &[&str] = &[
    "class",
    "rel",
    "rev",
    "accept-charset",
    "headers",
    "accesskey",
    "dropzone",
];

/// Matches elements by tag name and attribute values.
///
/// - `tags`: acceptable tag names (ASCII case-insensitive); empty accepts any element.
/// - `attrs`: required attribute values. For token-list attributes such as
///   `class` the expected value matches one token or the whole attribute
///   string; other attributes must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorRule {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl SelectorRule {
    /// A rule accepting the given tag names with no attribute requirement.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            attrs: BTreeMap::new(),
        }
    }

    /// Shorthand for `tag` carrying class `class`.
    pub fn class(tag: &str, class: &str) -> Self {
        Self::new([tag]).with_attr("class", class)
    }

    /// Adds an attribute requirement.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Tests a single node against the rule.
    pub fn matches(&self, node: &NodeRef) -> bool {
        if !node.is_element() {
            return false;
        }
        if !self.tags.is_empty() {
            let Some(name) = node.node_name() else {
                return false;
            };
            if !self.tags.iter().any(|t| t.eq_ignore_ascii_case(&name)) {
                return false;
            }
        }
        self.attrs.iter().all(|(attr, expected)| match node.attr(attr) {
            Some(actual) => attr_value_matches(attr, &actual, expected),
            None => false,
        })
    }

    /// All matching descendants of `scope`, in document order.
    ///
    /// `scope` itself is never returned.
    pub fn find_all_in<'a>(&self, scope: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
        match matcher_for(self) {
            Some(matcher) => Selection::from(*scope)
                .select_matcher(&matcher)
                .nodes()
                .iter()
                .filter(|n| self.matches(n))
                .copied()
                .collect(),
            // Unusual tag names that CSS cannot express: walk the subtree instead.
            None => scope
                .descendants()
                .into_iter()
                .filter(|n| self.matches(n))
                .collect(),
        }
    }

    /// First matching descendant of `scope`.
    pub fn find_in<'a>(&self, scope: &NodeRef<'a>) -> Option<NodeRef<'a>> {
        self.find_all_in(scope).into_iter().next()
    }

    /// First matching element anywhere in `doc`.
    pub fn find<'a>(&self, doc: &'a Document) -> Option<NodeRef<'a>> {
        self.find_in(&doc.root())
    }

    /// Every matching element in `doc`.
    pub fn find_all<'a>(&self, doc: &'a Document) -> Vec<NodeRef<'a>> {
        self.find_all_in(&doc.root())
    }
}

fn attr_value_matches(attr: &str, actual: &str, expected: &str) -> bool {
    if actual == expected {
        return true;
    }
    MULTI_VALUED_ATTRS
        .iter()
        .any(|multi| multi.eq_ignore_ascii_case(attr))
        && actual.split_whitespace().any(|token| token == expected)
}

/// Returns the first match of the first rule that matches anything.
pub fn find_first<'a>(rules: &[SelectorRule], scope: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    rules.iter().find_map(|rule| rule.find_in(scope))
}
