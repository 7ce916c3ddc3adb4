//! Parse error types
//!
//! Every parse failure carries the token the parser could not accept.

use crate::lexer::Token;
use crate::parser::cursor::TokenCursor;
use thiserror::Error;
use wcc_common::CompilerError;

/// Parse error types specific to the parser
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expected {expected}, found {}", found.token_type)]
    UnexpectedToken {
        expected: String,
        found: Token,
    },

    #[error("{message}")]
    Invalid {
        message: String,
        found: Token,
    },
}

impl ParseError {
    /// The offending token
    pub fn token(&self) -> &Token {
        match self {
            ParseError::UnexpectedToken { found, .. } | ParseError::Invalid { found, .. } => found,
        }
    }
}

/// Outcome of a parse attempt: the node plus the advanced cursor, or the
/// failure that stopped it.
pub type ParseResult<'t, T> = Result<(T, TokenCursor<'t>), ParseError>;

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        let location = err.token().span.start;
        CompilerError::parse_error(err.to_string(), location)
    }
}
