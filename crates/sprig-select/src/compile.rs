//! Selector compilation.
//!
//! [`try_compile`] turns a selector string into a [`Matcher`], reporting
//! selectors outside the supported grammar as a [`SelectorError`].
//! [`compile`] is the lenient form used by queries: it never fails, and a
//! selector it cannot make sense of compiles to [`Matcher::Never`] after a
//! one-time warning.

use sprig_common::warning::warn_once;
use thiserror::Error;

use crate::kind::{
    CHILD_COMBINATOR, DESCENDANT_COMBINATOR, SelectorKind, classify, combinator_kind,
};
use crate::matcher::{Combinator, Matcher};

/// A selector the compiler cannot turn into a meaningful matcher.
///
/// Each variant carries the selector text it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector, or one side of a combinator or a `tag.class` pair, is empty.
    ///
    /// Examples: `""`, `"#"`, `"div."`, `"div > "`, `" span"`
    #[error("empty selector in '{0}'")]
    EmptySelector(String),

    /// A compound with more than one class.
    ///
    /// Examples: `"div.a.b"`, `".a.b"`
    #[error("'{0}' names more than one class; only tag.class is supported")]
    MultipleClasses(String),

    /// A combinator operand that contains another combinator.
    ///
    /// Examples: `"ul > li > a"`, `"nav ul li"`
    #[error("'{0}' chains combinators; only one combinator per selector is supported")]
    NestedCombinator(String),
}

/// Compile `selector`, downgrading a malformed selector to [`Matcher::Never`].
///
/// The error is reported once per distinct message through
/// [`warn_once`] and is otherwise invisible to the caller; a query with
/// such a selector simply finds nothing.
#[must_use]
pub fn compile(selector: &str) -> Matcher {
    match try_compile(selector) {
        Ok(matcher) => matcher,
        Err(err) => {
            warn_once("Select", &err.to_string());
            Matcher::Never
        }
    }
}

/// Compile `selector` into a [`Matcher`].
///
/// The selector is classified once with [`classify`] and compiled according
/// to its kind. An id, class or `tag.class` selector that also contains a
/// combinator (`div.cls > span`) is compiled as that combinator, so either
/// operand may itself be an id, class or `tag.class` selector.
///
/// # Errors
/// Returns a [`SelectorError`] for empty selectors or operands, compounds
/// with more than one class, and chained combinators.
pub fn try_compile(selector: &str) -> Result<Matcher, SelectorError> {
    let kind = match classify(selector) {
        kind if !kind.is_combinator() => combinator_kind(selector).unwrap_or(kind),
        kind => kind,
    };

    match kind {
        SelectorKind::Id => {
            let name = non_empty(selector, selector.strip_prefix('#'))?;
            Ok(Matcher::Id(name.to_string()))
        }
        SelectorKind::Class => {
            let name = non_empty(selector, selector.strip_prefix('.'))?;
            if name.contains('.') {
                return Err(SelectorError::MultipleClasses(selector.to_string()));
            }
            Ok(Matcher::Class(name.to_string()))
        }
        SelectorKind::TagAndClass => compile_tag_and_class(selector),
        SelectorKind::DirectChild => {
            let (parent, child) = split_operands(selector, CHILD_COMBINATOR)?;
            Ok(relative(Combinator::Child, parent, child))
        }
        SelectorKind::Descendant => {
            let (ancestor, subject) = split_operands(selector, DESCENDANT_COMBINATOR)?;
            Ok(relative(Combinator::Descendant, ancestor, subject))
        }
        SelectorKind::Tag => {
            let name = non_empty(selector, Some(selector))?;
            Ok(Matcher::Tag(name.to_uppercase()))
        }
    }
}

fn compile_tag_and_class(selector: &str) -> Result<Matcher, SelectorError> {
    let Some((tag, class)) = selector.split_once('.') else {
        return Err(SelectorError::EmptySelector(selector.to_string()));
    };
    if tag.is_empty() || class.is_empty() {
        return Err(SelectorError::EmptySelector(selector.to_string()));
    }
    if class.contains('.') {
        return Err(SelectorError::MultipleClasses(selector.to_string()));
    }

    let tag = try_compile(tag)?;
    let class = try_compile(&format!(".{class}"))?;
    Ok(Matcher::And(Box::new(tag), Box::new(class)))
}

/// Split `selector` at the first `combinator` and compile both sides.
///
/// Operands are whole selectors in their own right but may not contain a
/// further combinator.
fn split_operands(selector: &str, combinator: &str) -> Result<(Matcher, Matcher), SelectorError> {
    let Some((left, right)) = selector.split_once(combinator) else {
        return Err(SelectorError::EmptySelector(selector.to_string()));
    };
    for operand in [left, right] {
        if operand.is_empty() {
            return Err(SelectorError::EmptySelector(selector.to_string()));
        }
        if operand.contains(DESCENDANT_COMBINATOR) {
            return Err(SelectorError::NestedCombinator(selector.to_string()));
        }
    }
    Ok((try_compile(left)?, try_compile(right)?))
}

fn relative(combinator: Combinator, ancestor: Matcher, subject: Matcher) -> Matcher {
    Matcher::Relative {
        combinator,
        ancestor: Box::new(ancestor),
        subject: Box::new(subject),
    }
}

fn non_empty<'a>(selector: &str, name: Option<&'a str>) -> Result<&'a str, SelectorError> {
    name.filter(|name| !name.is_empty())
        .ok_or_else(|| SelectorError::EmptySelector(selector.to_string()))
}
