//! Template tokenizer
//!
//! Splits a template into text and the upper-case keywords `IF(...)`, `ELSE`
//! and `ENDIF`. Lower-case "if"/"else" in prose stay text.

use once_cell::sync::Lazy;
use regex::Regex;

static KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bIF\s*\(|\bELSE\b|\bENDIF\b").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Text,
    /// `IF(header)`
    If { header: &'a str },
    Else,
    EndIf,
}

/// A token and the exact source text it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub raw: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    fn text(source: &'a str, start: usize, end: usize) -> Self {
        Self {
            kind: TokenKind::Text,
            raw: &source[start..end],
            offset: start,
        }
    }
}

/// Tokenize a template. Concatenating every token's `raw` gives back the source.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for m in KEYWORD.find_iter(source) {
        // Already consumed as part of an IF header
        if m.start() < cursor {
            continue;
        }

        let (kind, end) = match m.as_str() {
            "ELSE" => (TokenKind::Else, m.end()),
            "ENDIF" => (TokenKind::EndIf, m.end()),
            _ => {
                let rest = &source[m.end()..];
                let Some(close) = header_end(rest) else {
                    continue;
                };
                (TokenKind::If { header: &rest[..close] }, m.end() + close + 1)
            }
        };

        if m.start() > cursor {
            tokens.push(Token::text(source, cursor, m.start()));
        }
        tokens.push(Token {
            kind,
            raw: &source[m.start()..end],
            offset: m.start(),
        });
        cursor = end;
    }

    if cursor < source.len() {
        tokens.push(Token::text(source, cursor, source.len()));
    }

    tokens
}

/// Byte offset of the `)` closing an `IF(` header. Nested parentheses in the
/// literal are balanced; the header must close on the same line.
fn header_end(rest: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            '\n' => return None,
            _ => {}
        }
    }
    None
}
