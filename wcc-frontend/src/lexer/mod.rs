//! Lexer
//!
//! Tokenizes source text line by line. `//` comments are stripped from each
//! line first; the remainder is scanned left to right, and at every position
//! the longest separator (whitespace, operator or special punctuation) is
//! matched. The text between separators becomes a keyword, basic type,
//! numeric literal or identifier token. Lexing stops at the first error.

pub mod token;
pub(crate) mod literals;
pub(crate) mod operators;

pub use token::{Keyword, Operator, Special, Token, TokenType};

use literals::{classify_word, LiteralError};
use log::debug;
use operators::{match_separator, Separator};
use wcc_common::{CompilerError, SourceLocation, SourceSpan};

pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
        }
    }

    /// Tokenize entire input into a vector of tokens, terminated by EOF
    pub fn tokenize(mut self) -> Result<Vec<Token>, CompilerError> {
        let mut last_line = 1;
        let mut last_column = 1;

        for (index, raw_line) in self.source.lines().enumerate() {
            let line_number = index as u32 + 1;
            let line = strip_comment(raw_line);
            self.tokenize_line(line, line_number)?;

            last_line = line_number;
            last_column = raw_line.chars().count() as u32 + 1;
        }

        self.tokens
            .push(Token::eof(SourceLocation::new(last_line, last_column)));
        debug!("lexed {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    /// Split one comment-free line into tokens
    fn tokenize_line(&mut self, line: &str, line_number: u32) -> Result<(), CompilerError> {
        let chars: Vec<char> = line.chars().collect();
        let mut position = 0;
        let mut word_start = 0;

        while position < chars.len() {
            match match_separator(&chars[position..]) {
                Some((separator, len)) => {
                    self.push_word(&chars[word_start..position], line_number, word_start)?;
                    if let Separator::Token(token_type) = separator {
                        let span = column_span(line_number, position, position + len);
                        self.tokens.push(Token::new(token_type, span));
                    }
                    position += len;
                    word_start = position;
                }
                None => position += 1,
            }
        }

        self.push_word(&chars[word_start..], line_number, word_start)
    }

    /// Classify and push the word that ended at a separator, if any
    fn push_word(&mut self, word: &[char], line_number: u32, start: usize) -> Result<(), CompilerError> {
        if word.is_empty() {
            return Ok(());
        }

        let text: String = word.iter().collect();
        let span = column_span(line_number, start, start + word.len());
        let token_type = classify_word(&text).map_err(|err| match err {
            LiteralError::MalformedNumber(number) => CompilerError::lexer_error(
                format!("Malformed numeric literal: {number}"),
                span.start,
            ),
            LiteralError::InvalidIdentifier(c) => CompilerError::lexer_error(
                format!("Invalid character {c:?} in identifier '{text}'"),
                span.start,
            ),
        })?;

        self.tokens.push(Token::new(token_type, span));
        Ok(())
    }
}

/// Drop everything from the first `//` to the end of the line
fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(index) => &line[..index],
        None => line,
    }
}

/// 1-based span for zero-based character offsets `[start, end)`
fn column_span(line: u32, start: usize, end: usize) -> SourceSpan {
    SourceSpan::on_line(line, start as u32 + 1, end as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcc_common::BasicType;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().unwrap()
    }

    fn types(input: &str) -> Vec<TokenType> {
        lex(input).into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_keywords_and_types() {
        let tokens = types("func var const if elif else while return as import export memory i32 void");
        assert_eq!(tokens.len(), 15); // 12 keywords + 2 types + EOF
        assert_eq!(tokens[0], TokenType::Keyword(Keyword::Func));
        assert_eq!(tokens[11], TokenType::Keyword(Keyword::Memory));
        assert_eq!(tokens[12], TokenType::BasicType(BasicType::I32));
        assert_eq!(tokens[13], TokenType::BasicType(BasicType::Void));
        assert_eq!(tokens[14], TokenType::EndOfFile);
    }

    #[test]
    fn test_operators_without_spaces() {
        let tokens = types("a<=b<c<<2!=d");
        let expected = vec![
            TokenType::Identifier("a".to_string()),
            TokenType::Operator(Operator::LessEqual),
            TokenType::Identifier("b".to_string()),
            TokenType::Operator(Operator::Less),
            TokenType::Identifier("c".to_string()),
            TokenType::Operator(Operator::LeftShift),
            TokenType::Number { value: "2".to_string(), ty: BasicType::I32 },
            TokenType::Operator(Operator::BangEqual),
            TokenType::Identifier("d".to_string()),
            TokenType::EndOfFile,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_numeric_literals() {
        let tokens = types("12 12. 12l 12ul 12.l");
        let expected = [
            ("12", BasicType::I32),
            ("12", BasicType::F32),
            ("12", BasicType::I64),
            ("12", BasicType::U64),
            ("12", BasicType::F64),
        ];
        for (token, (value, ty)) in tokens.iter().zip(expected) {
            assert_eq!(
                *token,
                TokenType::Number { value: value.to_string(), ty }
            );
        }
    }

    #[test]
    fn test_malformed_literals_fail() {
        for input in ["32847a", "3.2.7", "x = 1.0u;"] {
            let err = Lexer::new(input).tokenize().unwrap_err();
            assert!(matches!(err, CompilerError::LexError { .. }), "{input}");
        }
    }

    #[test]
    fn test_invalid_identifier_position() {
        let err = Lexer::new("func f(): void {\n  var $x: i32 = 1;\n}").tokenize().unwrap_err();
        match err {
            CompilerError::LexError { location, message } => {
                assert_eq!(location, SourceLocation::new(2, 7));
                assert!(message.contains("'$x'"));
            }
            other => panic!("Expected lex error, got {other:?}"),
        }
    }

    #[test]
    fn test_comments_are_stripped() {
        let tokens = types("var x // trailing words 3.2.7\n// whole line\nreturn");
        assert_eq!(
            tokens,
            vec![
                TokenType::Keyword(Keyword::Var),
                TokenType::Identifier("x".to_string()),
                TokenType::Keyword(Keyword::Return),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = lex("func add(a: i32)\n  return a;");

        assert_eq!(tokens[0].span, SourceSpan::on_line(1, 1, 5)); // func
        assert_eq!(tokens[1].span, SourceSpan::on_line(1, 6, 9)); // add
        assert_eq!(tokens[2].span, SourceSpan::on_line(1, 9, 10)); // (
        assert_eq!(tokens[4].span, SourceSpan::on_line(1, 11, 12)); // :
        assert_eq!(tokens[7].span, SourceSpan::on_line(2, 3, 9)); // return
    }

    #[test]
    fn test_import_location_tokens() {
        let tokens = types("import(env::log)");
        assert_eq!(
            tokens,
            vec![
                TokenType::Keyword(Keyword::Import),
                TokenType::Special(Special::LeftParen),
                TokenType::Identifier("env".to_string()),
                TokenType::Special(Special::DoubleColon),
                TokenType::Identifier("log".to_string()),
                TokenType::Special(Special::RightParen),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_empty_source_has_only_eof() {
        assert_eq!(types(""), vec![TokenType::EndOfFile]);
    }
}
