//! XML text escaping for dynamically sourced string values.
//!
//! Every string that a descriptor hands the serializer (URLs, titles,
//! publication names) passes through here before it becomes XML character
//! data, so hostile or malformed input can never produce element injection.
//! Statically known tag and attribute names are never escaped.

use std::borrow::Cow;

/// Escape a string for placement in an XML text node or attribute value.
///
/// Escapes `& < > " '`. Total over arbitrary input, including the empty
/// string; returns a borrow when nothing needs escaping.
///
/// # Examples
/// ```
/// use atlas_core::escape::escape_text;
///
/// assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_text("plain"), "plain");
/// ```
#[must_use]
pub fn escape_text(input: &str) -> Cow<'_, str> {
    let first = input
        .char_indices()
        .find(|(_, c)| matches!(c, '&' | '<' | '>' | '"' | '\''));

    let Some((start, _)) = first else {
        return Cow::Borrowed(input);
    };

    let mut escaped = String::with_capacity(input.len() + 8);
    escaped.push_str(&input[..start]);

    for c in input[start..].chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }

    Cow::Owned(escaped)
}
