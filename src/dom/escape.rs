//! HTML escaping for text written into the overlay document.

/// Escapes the characters that would otherwise be interpreted as markup.
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

/// Reduces a free-form token (notification kind, css hint) to `[a-z0-9-]`.
pub fn class_token(raw: &str, fallback: &str) -> String {
    let token: String = raw
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if token.is_empty() {
        fallback.to_string()
    } else {
        token
    }
}
