// ABOUTME: Tag classifier that folds every non-whitelisted element into one placeholder tag.
// ABOUTME: Attributes are cleared on every element; tree shape, children and text are untouched.

use std::collections::HashSet;

use super::tree::ArticleTree;

/// Name given to every element outside the portal's whitelist.
pub const GENERIC_TAG: &str = "else";

/// Renames non-whitelisted elements to [`GENERIC_TAG`] and strips all
/// attributes from every element of the article tree.
///
/// Returns the number of renamed elements. Running it twice with the same
/// whitelist changes nothing the second time.
pub fn classify(tree: &mut ArticleTree, whitelist: &HashSet<String>) -> usize {
    let mut renamed = 0;
    for node in tree.elements() {
        let allowed = node
            .node_name()
            .map(|name| whitelist.contains(&*name))
            .unwrap_or(false);
        if !allowed {
            node.rename(GENERIC_TAG);
            renamed += 1;
        }
        node.remove_all_attrs();
    }
    tracing::debug!(renamed, "classified article elements");
    renamed
}
