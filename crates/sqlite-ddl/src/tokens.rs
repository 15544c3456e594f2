use crate::ident::closing_quote;
use std::{iter::Peekable, str::CharIndices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Bare word: keyword, identifier, number or operator run.
    Word,
    /// Quoted identifier or literal, delimiters included.
    Quoted,
    /// Parenthesized group, parens included.
    Group,
    /// A stray `)` or `,`.
    Symbol,
}

/// One token of a clause, borrowing its raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Token<'_> {
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }

    pub fn is_group(&self) -> bool {
        self.kind == TokenKind::Group
    }

    /// Text between the parens of a group token.
    pub fn inner(&self) -> &str {
        match self.kind {
            TokenKind::Group => self
                .text
                .strip_prefix('(')
                .and_then(|t| t.strip_suffix(')'))
                .unwrap_or(self.text),
            _ => self.text,
        }
    }
}

/// Splits a clause into words, quoted runs and parenthesized groups.
///
/// Keywords are only ever recognized as whole `Word` tokens, so a leading
/// `checksum` or `unique_code` never reads as `CHECK` or `UNIQUE`.
pub(crate) fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        chars.next();
        let kind = if ch == '(' {
            skip_group(&mut chars);
            TokenKind::Group
        } else if let Some(close) = closing_quote(ch) {
            skip_quoted(&mut chars, close);
            TokenKind::Quoted
        } else if matches!(ch, ')' | ',') {
            TokenKind::Symbol
        } else {
            while let Some(&(_, c)) = chars.peek() {
                if c.is_whitespace() || matches!(c, '(' | ')' | ',') || closing_quote(c).is_some() {
                    break;
                }
                chars.next();
            }
            TokenKind::Word
        };

        let end = chars.peek().map_or(text.len(), |&(idx, _)| idx);
        tokens.push(Token {
            kind,
            text: &text[start..end],
            start,
            end,
        });
    }

    tokens
}

fn skip_quoted(chars: &mut Peekable<CharIndices<'_>>, close: char) {
    while let Some((_, c)) = chars.next() {
        if c == close {
            if chars.peek().map(|&(_, n)| n) == Some(close) {
                chars.next();
            } else {
                return;
            }
        }
    }
}

fn skip_group(chars: &mut Peekable<CharIndices<'_>>) {
    let mut depth = 1usize;
    while let Some((_, c)) = chars.next() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            c => {
                if let Some(close) = closing_quote(c) {
                    skip_quoted(chars, close);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(TokenKind, &str)> {
        tokenize(text).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_tokenize_column_clause() {
        assert_eq!(
            kinds("`text` varchar(500) DEFAULT \"a, (b\" NOT NULL"),
            vec![
                (TokenKind::Quoted, "`text`"),
                (TokenKind::Word, "varchar"),
                (TokenKind::Group, "(500)"),
                (TokenKind::Word, "DEFAULT"),
                (TokenKind::Quoted, "\"a, (b\""),
                (TokenKind::Word, "NOT"),
                (TokenKind::Word, "NULL"),
            ]
        );
    }

    #[test]
    fn test_tokenize_keyword_boundaries() {
        assert_eq!(
            kinds("CHECK(Age>=18)"),
            vec![(TokenKind::Word, "CHECK"), (TokenKind::Group, "(Age>=18)")]
        );
        assert_eq!(
            kinds("checksum text"),
            vec![(TokenKind::Word, "checksum"), (TokenKind::Word, "text")]
        );
    }

    #[test]
    fn test_tokenize_nested_group_and_stray_symbols() {
        let tokens = tokenize("REFERENCES `users`(`id`))");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2].text, "(`id`)");
        assert_eq!(tokens[2].inner(), "`id`");
        assert_eq!(tokens[3].kind, TokenKind::Symbol);
    }

    #[test]
    fn test_token_offsets() {
        let text = "a  'x''y'  (1, (2))";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }
}
