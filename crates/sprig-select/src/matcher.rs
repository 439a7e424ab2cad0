//! Compiled selectors and their evaluation against tree nodes.

use std::fmt;
use std::str::FromStr;

use sprig_dom::{DomTree, ElementData, NodeId};

use crate::compile::{SelectorError, try_compile};

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    Child,

    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    Descendant,
}

/// A compiled selector: a predicate over a single node of a [`DomTree`].
///
/// Plain data, so a compiled selector can be inspected, compared and printed
/// without touching a tree. [`Matcher::matches`] is the only interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Element whose `id` attribute equals the name.
    Id(String),

    /// Element with the name among its class tokens.
    Class(String),

    /// Element whose upper-cased tag name equals the stored name, which is
    /// upper-cased at compile time.
    Tag(String),

    /// Both matchers hold for the same node.
    And(Box<Matcher>, Box<Matcher>),

    /// `subject` holds for the node and `ancestor` holds for its parent
    /// ([`Combinator::Child`]) or for any node above it
    /// ([`Combinator::Descendant`]).
    Relative {
        /// Relationship between `ancestor` and the node being matched.
        combinator: Combinator,
        /// Matcher for the parent or ancestor.
        ancestor: Box<Matcher>,
        /// Matcher for the node itself.
        subject: Box<Matcher>,
    },

    /// Matches nothing. Produced for selectors that cannot be compiled.
    Never,
}

impl Matcher {
    /// Evaluate this matcher against `node`.
    ///
    /// Only element nodes can match; the document, text and comment nodes
    /// never do, including when they are reached while walking ancestors.
    /// An ID that is not in `tree` never matches.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self {
            Self::Id(name) => tree
                .as_element(node)
                .and_then(ElementData::id)
                .is_some_and(|id| id == name.as_str()),
            Self::Class(name) => tree
                .as_element(node)
                .is_some_and(|element| element.has_class(name)),
            Self::Tag(name) => tree
                .as_element(node)
                .is_some_and(|element| uppercase_eq(&element.tag_name, name)),
            Self::And(left, right) => left.matches(tree, node) && right.matches(tree, node),
            Self::Relative {
                combinator,
                ancestor,
                subject,
            } => {
                if !subject.matches(tree, node) {
                    return false;
                }
                match combinator {
                    Combinator::Child => tree
                        .parent(node)
                        .is_some_and(|parent| ancestor.matches(tree, parent)),
                    Combinator::Descendant => tree
                        .ancestors(node)
                        .any(|candidate| ancestor.matches(tree, candidate)),
                }
            }
            Self::Never => false,
        }
    }

    /// Whether this matcher can never match any node.
    #[must_use]
    pub const fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

/// `tag_name` upper-cased equals `upper`, compared char by char.
fn uppercase_eq(tag_name: &str, upper: &str) -> bool {
    tag_name.chars().flat_map(char::to_uppercase).eq(upper.chars())
}

/// Prints the matcher back as selector text (`DIV.cls > SPAN`). Tag names
/// come out upper-cased; [`Matcher::Never`] prints as `<never>`.
impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(name) => write!(f, "#{name}"),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Tag(name) => f.write_str(name),
            Self::And(left, right) => write!(f, "{left}{right}"),
            Self::Relative {
                combinator: Combinator::Child,
                ancestor,
                subject,
            } => write!(f, "{ancestor} > {subject}"),
            Self::Relative {
                combinator: Combinator::Descendant,
                ancestor,
                subject,
            } => write!(f, "{ancestor} {subject}"),
            Self::Never => f.write_str("<never>"),
        }
    }
}

impl FromStr for Matcher {
    type Err = SelectorError;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        try_compile(selector)
    }
}
