//! HTML helpers for admin-authored rich text.
//!
//! Plain user text never goes through here: Leptos escapes it when it is
//! rendered as a text node.

/// Strip scripts, event handlers and other active content while keeping
/// formatting markup (bold, links, lists, line breaks).
pub fn sanitize_rich(html: &str) -> String {
    ammonia::clean(html)
}

/// Escape text for contexts that are assembled as HTML strings.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_scripts() {
        let cleaned = sanitize_rich(r#"<b>Hi</b><script>alert(1)</script><img src="x" onerror="alert(2)">"#);
        assert!(cleaned.contains("<b>Hi</b>"));
        assert!(!cleaned.contains("script"));
        assert!(!cleaned.contains("onerror"));
    }

    #[test]
    fn test_sanitize_keeps_links() {
        let cleaned = sanitize_rich(r#"Call <a href="https://example.com">us</a>"#);
        assert!(cleaned.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
