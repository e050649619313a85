use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so that `&amp;lt;` decodes to `&lt;` and not to `<`
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters.
///
/// Borrows the input when nothing needs escaping, which is the common case
/// for chart formulas and attribute values.
///
/// # Examples
///
/// ```
/// use chartml::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("Sheet1!$A$1:$A$3"), "Sheet1!$A$1:$A$3");
/// assert_eq!(escape_xml("<tag>\"hi\"</tag>"), "&lt;tag&gt;&quot;hi&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if XML_ESCAPER.is_match(s) {
        Cow::Owned(XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]))
    } else {
        Cow::Borrowed(s)
    }
}

/// Unescape the five predefined XML entities.
///
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use chartml::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if s.contains('&') {
        Cow::Owned(XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"]))
    } else {
        Cow::Borrowed(s)
    }
}

/// Resolve a named or numeric entity reference (without `&` and `;`).
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_borrows_clean_input() {
        assert!(matches!(escape_xml("plain"), Cow::Borrowed(_)));
        assert!(matches!(escape_xml("a<b"), Cow::Owned(_)));
    }

    #[test]
    fn resolves_numeric_references() {
        assert_eq!(resolve_entity("#65"), Some('A'));
        assert_eq!(resolve_entity("#x41"), Some('A'));
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("nbsp"), None);
    }
}
