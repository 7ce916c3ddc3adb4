//! Declaration parsing: functions and memories

use crate::ast::*;
use crate::lexer::{Keyword, Special, Token, TokenType};
use crate::parser::cursor::TokenCursor;
use crate::parser::errors::{ParseError, ParseResult};
use crate::parser::Parser;
use wcc_common::BasicType;

impl<'t> Parser<'t> {
    /// Parse `func`, `func export` or `func import(ns::spec)`
    pub fn parse_function(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Func> {
        let start = cursor.peek();
        let (_, cursor) = cursor.expect_keyword(Keyword::Func, "function declaration")?;

        match &cursor.peek().token_type {
            TokenType::Keyword(Keyword::Import) => {
                let (location, cursor) = self.parse_import_location(cursor)?;
                let (signature, cursor) = self.parse_signature(cursor)?;
                let (_, cursor) = cursor.expect_special(Special::Semicolon, "function import")?;
                let import = FunctionImport {
                    node_id: self.node_ids.next(),
                    signature,
                    location,
                    span: cursor.span_from(start),
                };
                Ok((Func::Import(import), cursor))
            }
            TokenType::Keyword(Keyword::Export) => {
                let mut cursor = cursor;
                cursor.advance();
                let (definition, cursor) = self.parse_function_definition(cursor, start)?;
                Ok((Func::Export(definition), cursor))
            }
            _ => {
                let (definition, cursor) = self.parse_function_definition(cursor, start)?;
                Ok((Func::Plain(definition), cursor))
            }
        }
    }

    fn parse_function_definition(
        &mut self,
        cursor: TokenCursor<'t>,
        start: &'t Token,
    ) -> ParseResult<'t, FunctionDefinition> {
        let (signature, cursor) = self.parse_signature(cursor)?;
        let (body, cursor) = self.parse_block(cursor)?;

        let definition = FunctionDefinition {
            node_id: self.node_ids.next(),
            signature,
            body,
            span: cursor.span_from(start),
        };
        Ok((definition, cursor))
    }

    /// `name(param: type, ...): return_type`
    fn parse_signature(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Signature> {
        let (name, cursor) = cursor.expect_identifier("function signature")?;
        let (_, mut cursor) = cursor.expect_special(Special::LeftParen, "parameter list")?;

        let mut parameters = Vec::new();
        while !cursor.peek().is_special(Special::RightParen) {
            let (parameter, rest) = self.parse_parameter(cursor)?;
            parameters.push(parameter);
            cursor = rest;

            let next = cursor.peek();
            if next.is_special(Special::Comma) {
                cursor.advance();
            } else if !next.is_special(Special::RightParen) {
                return Err(ParseError::UnexpectedToken {
                    expected: "',' or ')' in parameter list".to_string(),
                    found: next.clone(),
                });
            }
        }
        cursor.advance(); // ')'

        let (_, cursor) = cursor.expect_special(Special::Colon, "function signature")?;
        let (return_type, cursor) = self.parse_type(cursor)?;

        let signature = Signature {
            name,
            return_type,
            parameters,
        };
        Ok((signature, cursor))
    }

    fn parse_parameter(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Parameter> {
        let start = cursor.peek();
        let (name, cursor) = cursor.expect_identifier("parameter")?;
        let (_, cursor) = cursor.expect_special(Special::Colon, "parameter")?;
        let (param_type, cursor) = self.parse_value_type(cursor)?;

        let parameter = Parameter {
            name,
            param_type,
            span: cursor.span_from(start),
        };
        Ok((parameter, cursor))
    }

    /// `import(namespace::specifier)`
    fn parse_import_location(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, ImportLocation> {
        let (_, cursor) = cursor.expect_keyword(Keyword::Import, "import location")?;
        let (_, cursor) = cursor.expect_special(Special::LeftParen, "import location")?;
        let (namespace, cursor) = cursor.expect_identifier("import namespace")?;
        let (_, cursor) = cursor.expect_special(Special::DoubleColon, "import location")?;
        let (specifier, cursor) = cursor.expect_identifier("import specifier")?;
        let (_, cursor) = cursor.expect_special(Special::RightParen, "import location")?;

        Ok((ImportLocation { namespace, specifier }, cursor))
    }

    /// `memory [export | import(ns::spec)] name(size);`
    pub fn parse_memory(&mut self, cursor: TokenCursor<'t>) -> ParseResult<'t, Memory> {
        let start = cursor.peek();
        let (_, mut cursor) = cursor.expect_keyword(Keyword::Memory, "memory declaration")?;

        let kind = match &cursor.peek().token_type {
            TokenType::Keyword(Keyword::Export) => {
                cursor.advance();
                MemoryKind::Export
            }
            TokenType::Keyword(Keyword::Import) => {
                let (location, rest) = self.parse_import_location(cursor)?;
                cursor = rest;
                MemoryKind::Import(location)
            }
            _ => MemoryKind::Plain,
        };

        let (name, cursor) = cursor.expect_identifier("memory declaration")?;
        let (_, cursor) = cursor.expect_special(Special::LeftParen, "memory size")?;
        let (size, cursor) = self.parse_memory_size(cursor)?;
        let (_, cursor) = cursor.expect_special(Special::RightParen, "memory size")?;
        let (_, cursor) = cursor.expect_special(Special::Semicolon, "memory declaration")?;

        let memory = Memory {
            node_id: self.node_ids.next(),
            name,
            size,
            kind,
            span: cursor.span_from(start),
        };
        Ok((memory, cursor))
    }

    /// Memory size in bytes: a plain `i32` literal that fits in `u32`
    fn parse_memory_size(&mut self, mut cursor: TokenCursor<'t>) -> ParseResult<'t, u32> {
        let token = cursor.peek();
        let size = match &token.token_type {
            TokenType::Number { value, ty: BasicType::I32 } => value.parse::<u32>().ok(),
            _ => None,
        };
        let Some(size) = size else {
            return Err(ParseError::UnexpectedToken {
                expected: "memory size in bytes".to_string(),
                found: token.clone(),
            });
        };
        cursor.advance();
        Ok((size, cursor))
    }
}
