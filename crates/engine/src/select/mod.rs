// ABOUTME: Rule-based element lookup shared by extractors and the body cleaners.
// ABOUTME: Re-exports SelectorRule and the compiled selector cache helpers.

//! Element selection.
//!
//! Submodules:
//! - `rule`: declarative tag/attribute rules and their lookup helpers.
//! - `compiled`: process-wide cache of compiled tag matchers, keyed by tag set.

pub mod compiled;
pub mod rule;

pub use compiled::{matcher_for, precompile_rules};
pub use rule::{find_first, SelectorRule};
