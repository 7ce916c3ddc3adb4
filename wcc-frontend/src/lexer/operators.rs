//! Separator tables for the lexer
//!
//! Operators and special punctuation overlap (`<` / `<=` / `<<`, `:` / `::`),
//! so the lexer always takes the longest separator that matches at the
//! current position.

use crate::lexer::token::{Operator, Special, TokenType};

const SPECIALS: &[(&str, Special)] = &[
    (";", Special::Semicolon),
    (",", Special::Comma),
    ("{", Special::LeftBrace),
    ("}", Special::RightBrace),
    ("(", Special::LeftParen),
    (")", Special::RightParen),
    ("::", Special::DoubleColon),
    (":", Special::Colon),
];

const OPERATORS: &[(&str, Operator)] = &[
    ("==", Operator::EqualEqual),
    ("!=", Operator::BangEqual),
    ("<=", Operator::LessEqual),
    (">=", Operator::GreaterEqual),
    ("<<", Operator::LeftShift),
    (">>", Operator::RightShift),
    ("=", Operator::Equal),
    ("<", Operator::Less),
    (">", Operator::Greater),
    ("+", Operator::Plus),
    ("-", Operator::Minus),
    ("*", Operator::Star),
    ("/", Operator::Slash),
    ("%", Operator::Percent),
    ("&", Operator::Ampersand),
    ("|", Operator::Pipe),
    ("^", Operator::Caret),
    ("!", Operator::Bang),
    ("@", Operator::At),
];

/// A separator found at some position in a line
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Separator {
    Whitespace,
    Token(TokenType),
}

/// Find the longest separator starting at the beginning of `rest`.
///
/// Returns the separator and its length in characters.
pub(crate) fn match_separator(rest: &[char]) -> Option<(Separator, usize)> {
    let first = *rest.first()?;
    if first.is_whitespace() {
        return Some((Separator::Whitespace, 1));
    }

    let specials = SPECIALS
        .iter()
        .map(|(text, special)| (*text, TokenType::Special(*special)));
    let operators = OPERATORS
        .iter()
        .map(|(text, op)| (*text, TokenType::Operator(*op)));

    let mut best: Option<(TokenType, usize)> = None;
    for (text, token_type) in specials.chain(operators) {
        let len = text.chars().count();
        if len > rest.len() || !text.chars().zip(rest).all(|(a, b)| a == *b) {
            continue;
        }
        if best.as_ref().map_or(true, |(_, best_len)| len > *best_len) {
            best = Some((token_type, len));
        }
    }

    best.map(|(token_type, len)| (Separator::Token(token_type), len))
}
