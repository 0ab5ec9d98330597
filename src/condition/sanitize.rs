//! Sanitization passes for serialized expressions
//!
//! Two pure passes: one over each atomic token before assembly, one over the
//! assembled expression. Together they keep user-typed text from being read
//! back as grammar.

use once_cell::sync::Lazy;
use regex::Regex;

/// Junctions and template keywords, standalone, any casing
static RESERVED_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:AND|OR|IF|ELSE|ENDIF)\b").expect("valid regex"));

/// Template keywords only; junctions are legitimate in an assembled expression
static TEMPLATE_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:IF|ELSE|ENDIF)\b").expect("valid regex"));

static WORD_OPERATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:contains|startsWith|endsWith)\b").expect("valid regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const QUOTES: [char; 3] = ['"', '\'', '`'];
const TOKEN_SPECIALS: [char; 8] = ['<', '>', '{', '}', '(', ')', ';', '\\'];
const EXPRESSION_SPECIALS: [char; 4] = ['{', '}', ';', '\\'];
const FIELD_OPERATOR_CHARS: [char; 2] = ['=', '!'];

fn strip_chars(input: &str, extra: &[char]) -> String {
    input
        .chars()
        .filter(|c| {
            !(c.is_control() && !c.is_whitespace()) && !QUOTES.contains(c) && !extra.contains(c)
        })
        .collect()
}

fn collapse_whitespace(input: &str) -> String {
    WHITESPACE.replace_all(input, " ").trim().to_string()
}

/// Token pass: applied to a field or value before it is assembled
pub fn sanitize_token(token: &str) -> String {
    // Words are removed on both sides of the strip so `IF(` and `O(R` both go
    let first = RESERVED_WORDS.replace_all(token, " ");
    let stripped = strip_chars(&first, &TOKEN_SPECIALS);
    let second = RESERVED_WORDS.replace_all(&stripped, " ");
    collapse_whitespace(&second)
}

/// Field names additionally lose anything an operator match could latch onto
pub fn sanitize_field(field: &str) -> String {
    let token = strip_chars(field, &FIELD_OPERATOR_CHARS);
    let token = sanitize_token(&WORD_OPERATORS.replace_all(&token, " "));
    let token = WORD_OPERATORS.replace_all(&token, " ");
    collapse_whitespace(&token)
}

/// Values must not start with `=`, or `>` followed by `=5` would re-parse as `>=`
pub fn sanitize_value(value: &str) -> String {
    let token = sanitize_token(value);
    token
        .trim_start_matches(|c: char| c == '=' || c.is_whitespace())
        .to_string()
}

/// Assembly pass: applied once to the complete expression string
pub fn sanitize_expression(expression: &str) -> String {
    let stripped = strip_chars(expression, &EXPRESSION_SPECIALS);
    let without_keywords = TEMPLATE_KEYWORDS.replace_all(&stripped, " ");
    collapse_whitespace(&without_keywords)
}
