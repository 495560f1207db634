//! Text sanitization applied to everything a user (or the seed tool) stores
//!
//! Catalog text is stored escaped. Pages therefore emit stored text as-is,
//! and every writer must pass its text through [`sanitize`] first.

/// Trim surrounding whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Replace characters that are unsafe inside HTML with entities
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim, then escape
pub fn sanitize(value: &str) -> String {
    escape(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape("<script>alert(\"x\")</script>"),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn test_escape_leaves_plain_text() {
        assert_eq!(escape("Midnights"), "Midnights");
    }

    #[test]
    fn test_sanitize_trims_before_escaping() {
        assert_eq!(sanitize("  R&B \t"), "R&amp;B");
    }

    #[test]
    fn test_apostrophe() {
        assert_eq!(sanitize("Kanye West's"), "Kanye West&#x27;s");
    }
}
