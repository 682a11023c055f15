//! Text escaping for emitted HTML and unescaping of stored source.
//!
//! Only the five entities the upstream note system produces are recognized:
//! `&amp; &lt; &gt; &quot; &#39;`. Anything else after an `&` is kept as-is.

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Exact inverse of [`escape_html`].
///
/// Decoding is a single left-to-right pass, so `&amp;lt;` becomes `&lt;`
/// and never `<`.
pub fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_five() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_ampersand_not_doubled() {
        assert_eq!(escape_html("&"), "&amp;");
        assert_eq!(escape_html("a&&b"), "a&amp;&amp;b");
    }

    #[test]
    fn test_unescape_all_five() {
        assert_eq!(unescape_html("&lt;&gt;&quot;&#39;&amp;"), "<>\"'&");
    }

    #[test]
    fn test_unescape_is_single_pass() {
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
        assert_eq!(unescape_html("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_unescape_keeps_unknown_entities() {
        assert_eq!(unescape_html("&nbsp;&copy"), "&nbsp;&copy");
        assert_eq!(unescape_html("trailing &"), "trailing &");
    }

    #[test]
    fn test_stored_source_round_trip() {
        let stored = "graph TD; A--&gt;B";
        assert_eq!(escape_html(&unescape_html(stored)), stored);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(escape_html("思源 <笔记>"), "思源 &lt;笔记&gt;");
        assert_eq!(unescape_html("思源 &lt;笔记&gt;"), "思源 <笔记>");
    }
}
