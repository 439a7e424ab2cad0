//! Selector classification.
//!
//! Every selector string maps to exactly one [`SelectorKind`]. The checks
//! overlap (`div.cls > span` contains both a dot and a combinator), so they
//! run in a fixed order and the first one that applies wins.

use strum_macros::{Display, EnumIter, EnumString};

/// The child combinator as it must appear in a selector: a `>` with exactly
/// one space on each side.
pub const CHILD_COMBINATOR: &str = " > ";

/// The descendant combinator: a single space.
pub const DESCENDANT_COMBINATOR: &str = " ";

/// The shape of a selector string.
///
/// Displays and parses as the kebab-case name (`tag-and-class`, `direct-child`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum SelectorKind {
    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// Example: `#main`
    Id,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// Example: `.highlight`
    Class,

    /// A type selector immediately followed by one class selector.
    ///
    /// Example: `div.highlight`
    TagAndClass,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    ///
    /// Example: `ul > li`
    DirectChild,

    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    ///
    /// Example: `article p`
    Descendant,

    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Example: `div`
    Tag,
}

/// Classify a selector string.
///
/// Total: every string has a kind, including the empty string (`Tag`).
/// Whether the selector is well formed is decided later, by the compiler.
///
/// 1. starts with `#` → [`SelectorKind::Id`]
/// 2. starts with `.` → [`SelectorKind::Class`]
/// 3. contains `.` → [`SelectorKind::TagAndClass`]
/// 4. contains `" > "` → [`SelectorKind::DirectChild`]
/// 5. contains a space → [`SelectorKind::Descendant`]
/// 6. otherwise → [`SelectorKind::Tag`]
#[must_use]
pub fn classify(selector: &str) -> SelectorKind {
    if selector.starts_with('#') {
        SelectorKind::Id
    } else if selector.starts_with('.') {
        SelectorKind::Class
    } else if selector.contains('.') {
        SelectorKind::TagAndClass
    } else if let Some(kind) = combinator_kind(selector) {
        kind
    } else {
        SelectorKind::Tag
    }
}

/// The combinator kind a selector contains, if any, ignoring the
/// id/class/dot checks that take priority in [`classify`].
#[must_use]
pub fn combinator_kind(selector: &str) -> Option<SelectorKind> {
    if selector.contains(CHILD_COMBINATOR) {
        Some(SelectorKind::DirectChild)
    } else if selector.contains(DESCENDANT_COMBINATOR) {
        Some(SelectorKind::Descendant)
    } else {
        None
    }
}

impl SelectorKind {
    /// Whether this kind joins two selectors with a combinator.
    #[must_use]
    pub const fn is_combinator(self) -> bool {
        matches!(self, Self::DirectChild | Self::Descendant)
    }
}
