//! Parser
//!
//! Recursive descent over the token vector. Parse functions take a
//! `TokenCursor` by value and return the node together with the advanced
//! cursor, so trying an alternative never disturbs the caller's position.
//! The parser stops at the first error.

pub mod cursor;
pub mod errors;
mod declarations;
mod expressions;
mod statements;
mod types;

pub use cursor::TokenCursor;
pub use errors::{ParseError, ParseResult};

use crate::ast::*;
use crate::lexer::{Keyword, Token, TokenType};
use log::debug;
use wcc_common::CompilerError;

pub struct Parser<'t> {
    tokens: &'t [Token],
    node_ids: NodeIdGenerator,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            node_ids: NodeIdGenerator::new(),
        }
    }

    /// Parse a whole module: function and memory declarations until EOF
    pub fn parse_module(&mut self) -> Result<Module, CompilerError> {
        let mut cursor = TokenCursor::new(self.tokens);
        let mut module = Module {
            funcs: Vec::new(),
            memories: Vec::new(),
        };

        while !cursor.is_at_end() {
            let token = cursor.peek();
            match &token.token_type {
                TokenType::Keyword(Keyword::Func) => {
                    let (func, rest) = self.parse_function(cursor)?;
                    module.funcs.push(func);
                    cursor = rest;
                }
                TokenType::Keyword(Keyword::Memory) => {
                    if !module.memories.is_empty() {
                        return Err(ParseError::Invalid {
                            message: "Only one memory declaration is allowed".to_string(),
                            found: token.clone(),
                        }
                        .into());
                    }
                    let (memory, rest) = self.parse_memory(cursor)?;
                    module.memories.push(memory);
                    cursor = rest;
                }
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "'func' or 'memory' declaration".to_string(),
                        found: token.clone(),
                    }
                    .into());
                }
            }
        }

        debug!(
            "parsed {} functions and {} memories",
            module.funcs.len(),
            module.memories.len()
        );
        Ok(module)
    }

    /// Parse a single expression that must span the whole input
    pub fn parse_standalone_expression(&mut self) -> Result<Expression, CompilerError> {
        let (expr, cursor) = self.parse_expression(TokenCursor::new(self.tokens))?;
        if !cursor.is_at_end() {
            return Err(ParseError::UnexpectedToken {
                expected: "end of expression".to_string(),
                found: cursor.peek().clone(),
            }
            .into());
        }
        Ok(expr)
    }
}
