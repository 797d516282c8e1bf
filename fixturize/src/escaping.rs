//! Attribute value escaping and normalization.
//!
//! XML parsers replace literal tabs and line breaks inside attribute values
//! with spaces, so a value holding them only survives a round trip when they
//! are written as character references.

use std::borrow::Cow;

/// Escape an attribute value for writing between double quotes.
/// Escapes: `&` `<` `>` `"` `'` plus tab, line feed and carriage return.
pub(crate) fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'', '\t', '\n', '\r']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#09;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Apply attribute-value normalization to a raw (still escaped) value.
///
/// A `\r\n` pair counts as one line break. Every literal tab, line feed or
/// carriage return becomes a space; character references are left for
/// unescaping, so `&#10;` still yields a line feed.
pub(crate) fn normalize_attribute(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(raw.replace("\r\n", " ").replace(['\t', '\n', '\r'], " "))
}
