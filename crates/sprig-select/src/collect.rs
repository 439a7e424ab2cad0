//! Tree traversal.

use sprig_dom::{DomTree, NodeId};

use crate::matcher::Matcher;

/// Collect every node in the subtree rooted at `root` that `matcher` accepts.
///
/// Pre-order, depth first: a node comes before its descendants and children
/// are visited in order. Every node of the subtree is visited exactly once;
/// a match does not stop the walk or prune the matched node's subtree, so
/// matches may nest. Relative matchers still look at ancestors above `root`.
///
/// A `root` that is not in `tree` yields an empty result.
#[must_use]
pub fn collect(tree: &DomTree, matcher: &Matcher, root: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    if matcher.matches(tree, root) {
        result.push(root);
    }
    for &child in tree.children(root) {
        result.extend(collect(tree, matcher, child));
    }
    result
}
