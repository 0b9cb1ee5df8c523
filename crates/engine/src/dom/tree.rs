// ABOUTME: ArticleTree owns one parsed document and the article container being cleaned.
// ABOUTME: Tracks protected (media-descendant) node ids that later attribute stripping skips.

use std::collections::HashSet;

use dom_query::{Document, NodeId, NodeRef, Selection};

use crate::select::{find_first, SelectorRule};

/// A parsed document narrowed to its article container.
///
/// The cleaning stages take `&mut ArticleTree`: one stage at a time owns the
/// tree, and nothing else holds on to its nodes between stages.
pub struct ArticleTree {
    doc: Document,
    root: NodeId,
    protected: HashSet<NodeId>,
}

impl ArticleTree {
    /// Takes ownership of `doc` and locates the article container with the
    /// first rule that matches anything. Returns `None` when no rule matches.
    pub fn locate(doc: Document, rules: &[SelectorRule]) -> Option<Self> {
        let root = find_first(rules, &doc.root())?.id;
        Some(Self {
            doc,
            root,
            protected: HashSet::new(),
        })
    }

    /// Parses `html` and locates the article container.
    pub fn from_html(html: &str, rules: &[SelectorRule]) -> Option<Self> {
        Self::locate(Document::from(html), rules)
    }

    /// The article container node.
    pub fn root(&self) -> NodeRef<'_> {
        self.doc
            .tree
            .get(&self.root)
            .unwrap_or_else(|| self.doc.root())
    }

    /// The container and every element below it, in document order.
    pub fn elements(&self) -> Vec<NodeRef<'_>> {
        let root = self.root();
        let mut out = vec![root];
        out.extend(root.descendants().into_iter().filter(|n| n.is_element()));
        out
    }

    /// True when `node` is still attached below the container.
    pub fn contains(&self, node: &NodeRef) -> bool {
        let mut current = node.parent();
        while let Some(parent) = current {
            if parent.id == self.root {
                return true;
            }
            current = parent.parent();
        }
        false
    }

    pub fn protect(&mut self, id: NodeId) {
        self.protected.insert(id);
    }

    pub fn is_protected(&self, id: &NodeId) -> bool {
        self.protected.contains(id)
    }

    pub fn protected_count(&self) -> usize {
        self.protected.len()
    }

    /// Outer HTML of the container.
    pub fn html(&self) -> String {
        Selection::from(self.root()).html().to_string()
    }

    /// Text content of the container.
    pub fn text(&self) -> String {
        self.root().text().to_string()
    }
}
