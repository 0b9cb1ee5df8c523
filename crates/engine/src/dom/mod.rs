// ABOUTME: In-place cleaning stages for the article body tree.
// ABOUTME: Decomposition, link normalization and tag classification over an owned ArticleTree.

//! Article body cleaning.
//!
//! Each stage mutates an [`ArticleTree`] through a unique reference. The
//! pipeline runs them as decompose → normalize links → collect links →
//! classify.

pub mod classify;
pub mod decompose;
pub mod links;
pub mod tree;

pub use classify::{classify, GENERIC_TAG};
pub use decompose::decompose;
pub use links::{collect_links, normalize_links, LinkTarget, BASIC_LINK_ATTRS, BASIC_LINK_TAGS};
pub use tree::ArticleTree;
