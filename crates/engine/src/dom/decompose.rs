// ABOUTME: Removes rule-matched subtrees from the article and protects media descendants.
// ABOUTME: Rules run in declaration order; protection is computed on the tree that survives removal.

use dom_query::NodeId;

use super::tree::ArticleTree;
use crate::select::SelectorRule;

/// Detaches every subtree matching any of `rules`, then marks every
/// descendant of a `media_tags` element as protected.
///
/// All rules are applied. A node that already went away with an earlier
/// match is not counted again. Returns the number of detached subtrees.
pub fn decompose(tree: &mut ArticleTree, rules: &[SelectorRule], media_tags: &[String]) -> usize {
    let mut removed = 0;
    for rule in rules {
        let root = tree.root();
        for node in rule.find_all_in(&root) {
            // An ancestor matched earlier in this pass.
            if !tree.contains(&node) {
                continue;
            }
            node.remove_from_parent();
            removed += 1;
        }
    }

    let to_protect: Vec<NodeId> = {
        let root = tree.root();
        media_tags
            .iter()
            .flat_map(|tag| SelectorRule::new([tag.as_str()]).find_all_in(&root))
            .flat_map(|media| media.descendants())
            .map(|node| node.id)
            .collect()
    };
    for id in to_protect {
        tree.protect(id);
    }

    tracing::debug!(
        removed,
        protected = tree.protected_count(),
        "decomposed article subtrees"
    );
    removed
}
