//! Identifier and literal quoting helpers for the SQLite dialect.

/// Returns the closing delimiter for a character that opens a quoted
/// identifier or literal.
pub fn closing_quote(open: char) -> Option<char> {
    match open {
        '`' => Some('`'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '[' => Some(']'),
        _ => None,
    }
}

/// Strips one level of quoting and unescapes doubled closing delimiters.
///
/// Text that is not wrapped in a matching pair of delimiters is returned as-is.
pub fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    let (Some(open), Some(last)) = (chars.next(), chars.next_back()) else {
        return text.to_string();
    };

    match closing_quote(open) {
        Some(close) if close == last => {
            let inner = &text[open.len_utf8()..text.len() - last.len_utf8()];
            if open == '[' {
                inner.to_string()
            } else {
                let doubled: String = [close, close].iter().collect();
                inner.replace(&doubled, &close.to_string())
            }
        }
        _ => text.to_string(),
    }
}

/// Wraps an identifier in backticks, escaping embedded backticks.
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_variants() {
        assert_eq!(unquote("`id`"), "id");
        assert_eq!(unquote("\"id\""), "id");
        assert_eq!(unquote("'it''s'"), "it's");
        assert_eq!(unquote("[order]"), "order");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("id"), "id");
        assert_eq!(unquote("`"), "`");
        assert_eq!(unquote("`id\""), "`id\"");
    }

    #[test]
    fn test_quote_backtick() {
        assert_eq!(quote_backtick("id"), "`id`");
        assert_eq!(quote_backtick("we`ird"), "`we``ird`");
    }
}
