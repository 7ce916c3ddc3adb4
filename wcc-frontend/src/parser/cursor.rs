//! Token cursor used by the backtracking parser
//!
//! A cursor is a shared token slice plus an index, so copying it is free.
//! Every parse attempt works on its own copy and hands back the advanced
//! copy on success; a failed attempt simply drops its copy and leaves the
//! caller's cursor untouched.

use crate::lexer::{Keyword, Special, Token, TokenType};
use crate::parser::errors::{ParseError, ParseResult};
use wcc_common::{SourceLocation, SourceSpan};

/// Returned when peeking past a token slice that lacks an EOF token
static EOF_TOKEN: Token = Token {
    token_type: TokenType::EndOfFile,
    span: SourceSpan {
        start: SourceLocation { line: 0, column: 0 },
        end: SourceLocation { line: 0, column: 0 },
    },
};

#[derive(Debug, Clone, Copy)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, position: 0 }
    }

    /// Peek at current token without consuming
    pub fn peek(&self) -> &'t Token {
        self.peek_at(0)
    }

    /// Peek ahead `offset` tokens; positions past the end yield the last token
    pub fn peek_at(&self, offset: usize) -> &'t Token {
        let index = self.position + offset;
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// The most recently consumed token
    pub fn previous(&self) -> Option<&'t Token> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    /// Consume the current token; the cursor never moves past EOF
    pub fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if self.position < self.tokens.len() && token.token_type != TokenType::EndOfFile {
            self.position += 1;
        }
        token
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EndOfFile
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Span from `start` to the end of the last consumed token
    pub fn span_from(&self, start: &Token) -> SourceSpan {
        let end = self.previous().map_or(start.span.end, |token| token.span.end);
        SourceSpan::new(start.span.start, end)
    }

    /// Expect and consume a specific special token
    pub fn expect_special(mut self, special: Special, context: &str) -> ParseResult<'t, &'t Token> {
        let token = self.peek();
        if token.is_special(special) {
            self.advance();
            Ok((token, self))
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("'{special}' in {context}"),
                found: token.clone(),
            })
        }
    }

    /// Expect and consume a specific keyword
    pub fn expect_keyword(mut self, keyword: Keyword, context: &str) -> ParseResult<'t, &'t Token> {
        let token = self.peek();
        if token.is_keyword(keyword) {
            self.advance();
            Ok((token, self))
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("'{keyword}' in {context}"),
                found: token.clone(),
            })
        }
    }

    /// Expect and consume an identifier, returning its name
    pub fn expect_identifier(mut self, context: &str) -> ParseResult<'t, String> {
        let token = self.peek();
        match &token.token_type {
            TokenType::Identifier(name) => {
                self.advance();
                Ok((name.clone(), self))
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: format!("identifier in {context}"),
                found: token.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn test_copies_are_independent() {
        let tokens = Lexer::new("a b c").tokenize().unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        let mut attempt = cursor;

        attempt.advance();
        attempt.advance();
        assert_eq!(attempt.position(), 2);
        assert_eq!(cursor.position(), 0);

        cursor.advance();
        assert_eq!(cursor.previous(), Some(&tokens[0]));
        assert_eq!(cursor.peek_at(1), &tokens[2]);
    }

    #[test]
    fn test_never_moves_past_eof() {
        let tokens = Lexer::new("x").tokenize().unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        cursor.advance();
        cursor.advance();
        cursor.advance();

        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.peek_at(10).token_type, TokenType::EndOfFile);
    }

    #[test]
    fn test_empty_slice_peeks_eof() {
        let cursor = TokenCursor::new(&[]);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.previous(), None);
    }

    #[test]
    fn test_expect_special_leaves_original_on_failure() {
        let tokens = Lexer::new("; x").tokenize().unwrap();
        let cursor = TokenCursor::new(&tokens);

        assert!(cursor.expect_special(Special::Comma, "test").is_err());
        let (token, rest) = cursor.expect_special(Special::Semicolon, "test").unwrap();
        assert_eq!(token, &tokens[0]);
        assert_eq!(rest.position(), 1);
        assert_eq!(cursor.position(), 0);
    }
}
