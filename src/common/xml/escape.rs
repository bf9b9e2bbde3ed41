use std::borrow::Cow;

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use docx_remediate::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// Unescape XML special characters.
///
/// Resolves the five predefined entities and numeric character references.
/// Input containing an unknown or malformed entity is returned unchanged.
///
/// # Examples
///
/// ```
/// use docx_remediate::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&quot;hello&apos;"), "\"hello'");
/// assert_eq!(unescape_xml("caf&#233;"), "café");
/// assert_eq!(unescape_xml("a & b"), "a & b"); // unchanged
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;"); // unknown entity
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    quick_xml::escape::unescape(s).unwrap_or(Cow::Borrowed(s))
}
