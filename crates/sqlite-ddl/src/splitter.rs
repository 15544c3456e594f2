//! Balanced splitting of clause lists and statement batches.
//!
//! The scan is a small state machine: a paren depth counter plus the closing
//! delimiter of the quoted run we are in, if any. Inside a quoted run a doubled
//! delimiter (`""`, `''`, ` `` `) is an escaped quote and does not end the run.

use crate::{error::DdlError, ident::closing_quote};
use std::{iter::Peekable, str::CharIndices};

/// Delimiter state for a left-to-right scan.
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    depth: usize,
    quote: Option<char>,
    escaped: bool,
    underflow: bool,
}

/// Where a scanned character sits relative to quotes and parens.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Position {
    /// The character is part of a quoted run, delimiters included.
    pub quoted: bool,
    /// Paren depth after the character was consumed.
    pub depth: usize,
}

impl ScanState {
    pub(crate) fn advance(&mut self, ch: char, next: Option<char>) -> Position {
        if let Some(close) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if ch == close {
                if next == Some(close) {
                    self.escaped = true;
                } else {
                    self.quote = None;
                }
            }
            return self.position(true);
        }

        match ch {
            '(' => self.depth += 1,
            ')' => match self.depth.checked_sub(1) {
                Some(depth) => self.depth = depth,
                None => self.underflow = true,
            },
            c => {
                if let Some(close) = closing_quote(c) {
                    self.quote = Some(close);
                    return self.position(true);
                }
            }
        }

        self.position(false)
    }

    pub(crate) fn in_quote(&self) -> bool {
        self.quote.is_some()
    }

    pub(crate) fn is_balanced(&self) -> bool {
        self.depth == 0 && self.quote.is_none() && !self.underflow
    }

    fn position(&self, quoted: bool) -> Position {
        Position {
            quoted,
            depth: self.depth,
        }
    }
}

fn next_char(chars: &mut Peekable<CharIndices<'_>>) -> Option<char> {
    chars.peek().map(|&(_, c)| c)
}

/// Splits a clause list (the inside of `CREATE TABLE t ( ... )`) at top-level
/// commas.
///
/// Each clause is trimmed and whitespace runs outside quotes collapse to a
/// single space; quoted content is kept verbatim.
pub fn split(body: &str) -> Result<Vec<String>, DdlError> {
    split_on(body, ',')
}

/// Splits a batch of statements at top-level semicolons.
pub fn split_statements(input: &str) -> Result<Vec<String>, DdlError> {
    split_on(input, ';')
}

/// Removes `--` line comments. A `--` inside a quoted run is content and is
/// kept; the newline ending a comment is kept too.
pub fn strip_comments(input: &str) -> String {
    let mut state = ScanState::default();
    let mut out = String::with_capacity(input.len());

    let mut chars = input.char_indices().peekable();
    while let Some((_, ch)) = chars.next() {
        let next = next_char(&mut chars);
        if ch == '-' && next == Some('-') && !state.in_quote() {
            while chars.next_if(|&(_, c)| c != '\n').is_some() {}
            continue;
        }
        state.advance(ch, next);
        out.push(ch);
    }
    out
}

fn split_on(input: &str, separator: char) -> Result<Vec<String>, DdlError> {
    let mut state = ScanState::default();
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut pending_space = false;

    let mut chars = input.char_indices().peekable();
    while let Some((_, ch)) = chars.next() {
        let pos = state.advance(ch, next_char(&mut chars));

        if !pos.quoted {
            if ch == separator && pos.depth == 0 {
                push_piece(&mut pieces, &mut current);
                pending_space = false;
                continue;
            }
            if ch.is_whitespace() {
                pending_space = true;
                continue;
            }
        }

        if pending_space && !current.is_empty() {
            current.push(' ');
        }
        pending_space = false;
        current.push(ch);
    }

    if !state.is_balanced() {
        return Err(DdlError::UnbalancedDelimiters(input.to_string()));
    }

    push_piece(&mut pieces, &mut current);
    Ok(pieces)
}

fn push_piece(pieces: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        pieces.push(std::mem::take(current));
    }
}

/// Locates the first top-level parenthesized group in `text`.
///
/// Returns the group's inner text and everything after its closing paren, or
/// `None` when `text` has no opening paren at all. The text after the group
/// must itself be balanced, so a stray `)` is rejected.
pub(crate) fn bracketed(text: &str) -> Result<Option<(&str, &str)>, DdlError> {
    let mut state = ScanState::default();
    let mut open = None;
    let mut close = None;

    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        let pos = state.advance(ch, next_char(&mut chars));
        if pos.quoted {
            continue;
        }
        match ch {
            '(' if open.is_none() => open = Some(idx),
            ')' if pos.depth == 0 && open.is_some() && close.is_none() => close = Some(idx),
            _ => {}
        }
    }

    let Some(open) = open else {
        return if state.is_balanced() {
            Ok(None)
        } else {
            Err(DdlError::UnbalancedDelimiters(text.to_string()))
        };
    };

    match close {
        Some(close) if state.is_balanced() => Ok(Some((&text[open + 1..close], &text[close + 1..]))),
        _ => Err(DdlError::UnbalancedDelimiters(text.to_string())),
    }
}
