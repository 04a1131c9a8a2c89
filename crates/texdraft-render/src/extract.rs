//! Placeholder extraction.
//!
//! Scans template text for `\VAR{...}` occurrences, keeping byte spans so
//! renderers can edit placeholders in place instead of relying on literal
//! substring replacement.

use std::sync::LazyLock;

use regex::Regex;

/// Marker separating an expression from its frozen value.
pub(crate) const FROZEN_MARKER: &str = "==";

static VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\VAR\{(.*?)\}").expect("invalid placeholder regex"));

/// A `\VAR{...}` occurrence with its byte span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte offset of the `\VAR{` opener.
    pub start: usize,
    /// Byte offset one past the closing brace.
    pub end: usize,
    /// Text between the braces, as written.
    pub inner: String,
}

impl Placeholder {
    /// The expression part, with any frozen marker removed.
    #[must_use]
    pub fn expression(&self) -> &str {
        split_frozen(&self.inner).0
    }

    /// The embedded frozen value, if present.
    #[must_use]
    pub fn frozen_value(&self) -> Option<&str> {
        split_frozen(&self.inner).1
    }

    /// Whether this placeholder carries a frozen value.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.inner.contains(FROZEN_MARKER)
    }
}

/// All placeholders in `template`, in source order.
///
/// Matching is non-greedy, so adjacent placeholders are never merged.
#[must_use]
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    VAR_PATTERN
        .captures_iter(template)
        .map(|caps| {
            let whole = caps.get(0).expect("capture 0 always present");
            Placeholder {
                start: whole.start(),
                end: whole.end(),
                inner: caps[1].to_owned(),
            }
        })
        .collect()
}

/// Unique placeholder keys in first-seen order.
#[must_use]
pub fn referenced_keys(template: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for placeholder in placeholders(template) {
        if !keys.contains(&placeholder.inner) {
            tracing::debug!(key = %placeholder.inner, "found placeholder");
            keys.push(placeholder.inner);
        }
    }
    keys
}

/// Split a key on the first `==` into (expression, embedded value).
///
/// Both sides are trimmed so `expr == value` and `expr==value` are
/// equivalent. The value is `None` when no marker is present.
#[must_use]
pub fn split_frozen(key: &str) -> (&str, Option<&str>) {
    match key.split_once(FROZEN_MARKER) {
        Some((expression, value)) => (expression.trim(), Some(value.trim())),
        None => (key.trim(), None),
    }
}
