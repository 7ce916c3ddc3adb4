//! Type parsing
//!
//! `void` is accepted only where a return type is expected. Value types are
//! a basic type name behind any number of `*` pointer sigils.

use crate::lexer::{Operator, TokenType};
use crate::parser::cursor::TokenCursor;
use crate::parser::errors::{ParseError, ParseResult};
use crate::parser::Parser;
use wcc_common::{BasicType, Type};

impl<'t> Parser<'t> {
    /// Parse a return type: `void` or any value type
    pub fn parse_type(&self, mut cursor: TokenCursor<'t>) -> ParseResult<'t, Type> {
        if cursor.peek().token_type == TokenType::BasicType(BasicType::Void) {
            cursor.advance();
            return Ok((Type::void(), cursor));
        }
        self.parse_value_type(cursor)
    }

    /// Parse a non-void type
    pub fn parse_value_type(&self, mut cursor: TokenCursor<'t>) -> ParseResult<'t, Type> {
        let token = cursor.peek();
        match &token.token_type {
            TokenType::Operator(Operator::Star) => {
                cursor.advance();
                let pointee = cursor.peek();
                if pointee.token_type == TokenType::BasicType(BasicType::Void) {
                    return Err(ParseError::Invalid {
                        message: "Pointer to void is not allowed".to_string(),
                        found: pointee.clone(),
                    });
                }
                let (inner, rest) = self.parse_value_type(cursor)?;
                Ok((Type::pointer_to(inner), rest))
            }
            TokenType::BasicType(BasicType::Void) => Err(ParseError::Invalid {
                message: "'void' is only allowed as a function return type".to_string(),
                found: token.clone(),
            }),
            TokenType::BasicType(basic) => {
                cursor.advance();
                Ok((Type::Basic(*basic), cursor))
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: "type".to_string(),
                found: token.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_type_str(input: &str) -> Result<Type, ParseError> {
        let tokens = Lexer::new(input).tokenize().unwrap();
        let parser = Parser::new(&tokens);
        parser
            .parse_type(TokenCursor::new(&tokens))
            .map(|(ty, _)| ty)
    }

    #[test]
    fn test_basic_and_void() {
        assert_eq!(parse_type_str("u64").unwrap(), Type::Basic(BasicType::U64));
        assert_eq!(parse_type_str("void").unwrap(), Type::void());
    }

    #[test]
    fn test_nested_pointers() {
        assert_eq!(
            parse_type_str("**f32").unwrap(),
            Type::pointer_to(Type::pointer_to(Type::Basic(BasicType::F32)))
        );
    }

    #[test]
    fn test_pointer_to_void_rejected() {
        let err = parse_type_str("**void").unwrap_err();
        assert!(matches!(err, ParseError::Invalid { .. }));
        assert_eq!(err.token().span.start.column, 3);
    }

    #[test]
    fn test_not_a_type() {
        let err = parse_type_str("x").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
