//! Engine warnings with colored terminal output.
//!
//! Provides deduplication so a selector compiled once per query does not
//! repeat the same complaint on every call. Used by the selector compiler to
//! report malformed selectors that it downgrades to a never-matching matcher.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about rejected input (prints once per unique message).
///
/// # Example
/// ```
/// use sprig_common::warning::{has_warned, warn_once};
///
/// warn_once("Select", "malformed selector 'div.a.b'");
/// assert!(has_warned("Select", "malformed selector 'div.a.b'"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(warning_key(component, message));

    if should_print {
        eprintln!("{}", format!("[Sprig {component}] ⚠ {message}").yellow());
    }
}

/// Whether `message` has been reported for `component` since the last
/// [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&warning_key(component, message)))
}

fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Clear all recorded warnings (call when starting on a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
