//! Word classification for the lexer
//!
//! A word is the text between two separators. Words starting with a digit
//! are numeric literals; everything else is a keyword, a basic type name
//! or an identifier.

use crate::lexer::token::{Keyword, TokenType};
use wcc_common::BasicType;

/// Why a word could not be turned into a token
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LiteralError {
    MalformedNumber(String),
    InvalidIdentifier(char),
}

/// Classify a word into a token type
pub(crate) fn classify_word(word: &str) -> Result<TokenType, LiteralError> {
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        let (value, ty) = classify_number(word)?;
        return Ok(TokenType::Number { value, ty });
    }

    if let Some(keyword) = Keyword::from_word(word) {
        return Ok(TokenType::Keyword(keyword));
    }
    if let Some(basic) = BasicType::from_name(word) {
        return Ok(TokenType::BasicType(basic));
    }

    if let Some(bad) = word.chars().find(|c| !is_identifier_char(*c)) {
        return Err(LiteralError::InvalidIdentifier(bad));
    }
    Ok(TokenType::Identifier(word.to_string()))
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Run the numeric literal state machine over a digit-starting word.
///
/// Digits accumulate the integer part until a `.` opens the fractional
/// part. The `u` and `l` suffixes are one-way: once either is set no more
/// digits or dots may follow. Returns the literal text (a trailing `.`
/// dropped) and the type selected by the suffixes.
pub(crate) fn classify_number(word: &str) -> Result<(String, BasicType), LiteralError> {
    let malformed = || LiteralError::MalformedNumber(word.to_string());

    let mut integer_part = String::new();
    let mut fraction: Option<String> = None;
    let mut unsigned = false;
    let mut long = false;

    for c in word.chars() {
        match c {
            '0'..='9' => {
                if unsigned || long {
                    return Err(malformed());
                }
                match fraction.as_mut() {
                    Some(digits) => digits.push(c),
                    None => integer_part.push(c),
                }
            }
            '.' => {
                if unsigned || long || fraction.is_some() {
                    return Err(malformed());
                }
                fraction = Some(String::new());
            }
            'u' => {
                if unsigned {
                    return Err(malformed());
                }
                unsigned = true;
            }
            'l' => {
                if long {
                    return Err(malformed());
                }
                long = true;
            }
            _ => return Err(malformed()),
        }
    }

    let is_float = fraction.is_some();
    let ty = match (is_float, long, unsigned) {
        (true, _, true) => return Err(malformed()),
        (false, false, false) => BasicType::I32,
        (false, false, true) => BasicType::U32,
        (false, true, false) => BasicType::I64,
        (false, true, true) => BasicType::U64,
        (true, false, false) => BasicType::F32,
        (true, true, false) => BasicType::F64,
    };

    let value = match fraction {
        Some(digits) if !digits.is_empty() => format!("{integer_part}.{digits}"),
        _ => integer_part,
    };

    if !fits(&value, ty) {
        return Err(malformed());
    }
    Ok((value, ty))
}

/// Whether `value` is representable as a `ty` constant. 32-bit integers
/// accept the full unsigned range.
fn fits(value: &str, ty: BasicType) -> bool {
    match ty {
        BasicType::I32 | BasicType::U32 => value.parse::<u32>().is_ok(),
        BasicType::I64 | BasicType::U64 => value.parse::<u64>().is_ok(),
        BasicType::F32 => value.parse::<f32>().is_ok_and(f32::is_finite),
        BasicType::F64 => value.parse::<f64>().is_ok_and(f64::is_finite),
        BasicType::Void => false,
    }
}
