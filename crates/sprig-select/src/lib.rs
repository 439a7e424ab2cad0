//! Selector matching for Sprig document trees.
//!
//! Answers "which nodes under this root does this selector match?" for a
//! small selector grammar:
//!
//! | Selector | Kind | Matches |
//! |---|---|---|
//! | `#main` | [`SelectorKind::Id`] | element with `id="main"` |
//! | `.note` | [`SelectorKind::Class`] | element with `note` among its classes |
//! | `div.note` | [`SelectorKind::TagAndClass`] | `div` element with class `note` |
//! | `ul > li` | [`SelectorKind::DirectChild`] | `li` whose parent is a `ul` |
//! | `article p` | [`SelectorKind::Descendant`] | `p` with an `article` ancestor |
//! | `div` | [`SelectorKind::Tag`] | `div` element, case-insensitively |
//!
//! Either side of a combinator may be any of the four simple forms
//! (`div.note > span`), but combinators do not chain.
//!
//! # Pipeline
//!
//! A query runs three stages once each:
//!
//! 1. [`classify`] - selector text to [`SelectorKind`]
//! 2. [`compile`] - selector text to a [`Matcher`], recursing into operands
//! 3. [`collect`] - pre-order walk applying the matcher to every node
//!
//! # Failure
//!
//! Queries fail closed. A selector outside the grammar compiles to
//! [`Matcher::Never`] (with a one-time warning on stderr) and finds nothing.
//! Use [`try_compile`] to get the [`SelectorError`] instead.
//!
//! # Example
//!
//! ```
//! use sprig_dom::{DomTree, ElementData, NodeId};
//! use sprig_select::query;
//!
//! let mut tree = DomTree::new();
//! let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
//! let body = tree.append_element(html, ElementData::new("body"));
//! let div = tree.append_element(body, ElementData::new("div").with_attr("class", "cls"));
//! let span = tree.append_element(body, ElementData::new("span").with_attr("class", "cls"));
//!
//! assert_eq!(query(&tree, ".cls", html), vec![div, span]);
//! assert_eq!(query(&tree, "body > span", html), vec![span]);
//! ```

pub mod collect;
pub mod compile;
pub mod kind;
pub mod matcher;

pub use collect::collect;
pub use compile::{SelectorError, compile, try_compile};
pub use kind::{SelectorKind, classify};
pub use matcher::{Combinator, Matcher};

use sprig_dom::{DomTree, NodeId};

/// Find every node in the subtree rooted at `root` that matches `selector`,
/// in pre-order.
///
/// The selector is compiled once with [`compile`]; a malformed selector
/// finds nothing.
#[must_use]
pub fn query(tree: &DomTree, selector: &str, root: NodeId) -> Vec<NodeId> {
    let matcher = compile(selector);
    collect(tree, &matcher, root)
}

/// [`query`] starting from the tree's [`default_root`].
#[must_use]
pub fn query_document(tree: &DomTree, selector: &str) -> Vec<NodeId> {
    query(tree, selector, default_root(tree))
}

/// The node a whole-document query starts from: the `<body>` element if
/// there is one, else the document element, else the Document node.
#[must_use]
pub fn default_root(tree: &DomTree) -> NodeId {
    tree.body()
        .or_else(|| tree.document_element())
        .unwrap_or(NodeId::ROOT)
}
